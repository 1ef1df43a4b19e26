use std::ffi::CString;

use nix::unistd;

use crate::error::ExecError;
use crate::types::Stage;

/// Ordered directories consulted for a bare program name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
	dirs: Vec<String>,
}

impl SearchPath {
	pub fn new(list: Option<&str>) -> SearchPath {
		let dirs = list.map_or_else(Vec::new, |l| {
			l.split(':').filter(|d| !d.is_empty()).map(str::to_owned).collect()
		});
		SearchPath { dirs }
	}

	pub fn dirs(&self) -> &[String] {
		&self.dirs
	}

	/// Paths tried for `name`: each `dir/name` in order, then `name` as given.
	pub fn candidates(&self, name: &str) -> Vec<String> {
		let mut paths: Vec<String> = self.dirs.iter().map(|dir| format!("{}/{}", dir, name)).collect();
		paths.push(name.to_owned());
		paths
	}
}

/// Everything `execv` needs, converted before forking.
#[derive(Debug)]
pub struct Launch {
	name: String,
	argv: Vec<CString>,
	candidates: Vec<CString>,
}

impl Launch {
	pub fn prepare(search: &SearchPath, stage: &Stage) -> Result<Launch, ExecError> {
		let argv = stage.argv.iter().map(|a| CString::new(a.as_str())).collect::<Result<Vec<_>, _>>()?;
		let candidates = search.candidates(stage.name()).into_iter()
			.map(CString::new)
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Launch { name: stage.name().to_owned(), argv, candidates })
	}

	/// Replaces the process image with the first candidate that executes.
	/// Returns only when every candidate failed.
	pub fn exec(&self) -> ExecError {
		for path in &self.candidates {
			if let Err(e) = unistd::execv(path, &self.argv) {
				log::debug!("execv {:?}: {}", path, e);
			}
		}
		ExecError::NotFound(self.name.clone())
	}
}
