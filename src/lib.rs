//! A small interactive command interpreter.
//!
//! Lines are split into words, cut into pipeline stages on `|`, and each
//! stage is launched as its own process with its standard input and output
//! wired to its neighbours or to a redirected file.

pub mod builtin;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod global;
pub mod job;
pub mod parser;
pub mod repl;
pub mod search;
pub mod types;
