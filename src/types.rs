use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectKind { Input, Output, Append }

/// Redirection symbols in scan order.
pub const REDIRECT_SYMBOLS: [(&str, RedirectKind); 3] = [
	("<", RedirectKind::Input),
	(">", RedirectKind::Output),
	(">>", RedirectKind::Append),
];

impl RedirectKind {
	pub fn from_symbol(token: &str) -> Option<RedirectKind> {
		REDIRECT_SYMBOLS.iter().find(|&&(sym, _)| sym == token).map(|&(_, kind)| kind)
	}

	pub fn symbol(self) -> &'static str {
		match self {
			RedirectKind::Input => "<",
			RedirectKind::Output => ">",
			RedirectKind::Append => ">>",
		}
	}
}

impl fmt::Display for RedirectKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.symbol())
	}
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Redirect {
	pub kind: RedirectKind,
	pub target: String,
}

/// One command of a pipeline. `argv[0]` is the program name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Stage {
	pub argv: Vec<String>,
	pub redirect: Option<Redirect>,
}

impl Stage {
	/// Panics if `argv` is empty; stages built by the parser never are.
	pub fn name(&self) -> &str {
		&self.argv[0]
	}
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Pipeline {
	pub stages: Vec<Stage>,
}
