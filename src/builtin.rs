use std::env;
use std::io::{self, Write};

use crate::global;

const HOME_KEY: &str = "HOME";

/// What the session does after a built-in ran.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
	Continue,
	Exit(i32),
}

pub type Builtin = fn(&mut global::State, &[String]) -> Flow;

pub fn builtin_cd(state: &mut global::State, argv: &[String]) -> Flow {
	let target = match argv.get(1) {
		Some(dir) => dir.clone(),
		None => match state.env.var(HOME_KEY) {
			Some(home) => home,
			None => {
				let _ = writeln!(io::stderr(), "cd: HOME not set");
				return Flow::Continue;
			},
		},
	};
	if let Err(e) = env::set_current_dir(&target) {
		let _ = writeln!(io::stderr(), "cd: {}: {}", target, e);
	}
	Flow::Continue
}

pub fn builtin_exit(_: &mut global::State, _: &[String]) -> Flow {
	Flow::Exit(0)
}

pub fn match_builtin(name: &str) -> Option<Builtin> {
	match name {
		"cd" => Some(builtin_cd),
		"exit" => Some(builtin_exit),
		_ => None,
	}
}
