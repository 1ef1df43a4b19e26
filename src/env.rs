use std::collections::HashMap;
use std::env as stdenv;

/// Source of environment variables for the session.
pub trait Environment {
	fn var(&self, key: &str) -> Option<String>;
}

/// Reads the environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
	fn var(&self, key: &str) -> Option<String> {
		stdenv::var(key).ok()
	}
}

/// Fixed set of variables, independent of the process environment.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
	vars: HashMap<String, String>,
}

impl MapEnvironment {
	pub fn new() -> MapEnvironment {
		MapEnvironment::default()
	}

	pub fn with(mut self, key: impl Into<String>, val: impl Into<String>) -> MapEnvironment {
		self.vars.insert(key.into(), val.into());
		self
	}
}

impl Environment for MapEnvironment {
	fn var(&self, key: &str) -> Option<String> {
		self.vars.get(key).cloned()
	}
}
