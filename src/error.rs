use std::{ffi, io};

use thiserror::Error;

use crate::types::RedirectKind;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseError {
	#[error("empty command")]
	EmptyCommand,
	#[error("missing file name after '{0}'")]
	MissingRedirectTarget(RedirectKind),
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ExecError {
	#[error("{0}")]
	Nix(#[from] nix::Error),
	#[error("{0}")]
	Io(#[from] io::Error),
	#[error("argument contains a nul byte: {0}")]
	Nul(#[from] ffi::NulError),
	#[error("command not found: {0}")]
	NotFound(String),
	#[error("{path}: {source}")]
	Redirect { path: String, source: io::Error },
}

impl ExecError {
	/// Status a child process exits with when it fails with this error.
	pub fn exit_code(&self) -> i32 {
		match *self {
			ExecError::NotFound(_) => 127,
			ExecError::Redirect { .. } => 1,
			_ => 126,
		}
	}
}
