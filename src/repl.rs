use std::io::{self, BufRead, Write};

use crate::builtin::{self, Flow};
use crate::eval;
use crate::global;
use crate::parser;

/// Dispatches one input line. Built-ins short-circuit before the line is
/// split into stages; anything else is run as a pipeline and its status
/// written to `out`.
pub fn eval_line(state: &mut global::State, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
	let tokens = parser::tokenize(line);
	log::debug!("tokens: {:?}", tokens);
	if let Some(builtin) = tokens.first().and_then(|name| builtin::match_builtin(name)) {
		return Ok(builtin(state, &tokens));
	}

	let pipeline = match parser::parse_tokens(tokens) {
		Ok(Some(pipeline)) => pipeline,
		Ok(None) => return Ok(Flow::Continue),
		Err(e) => {
			let _ = writeln!(io::stderr(), "rsh: {}", e);
			return Ok(Flow::Continue);
		},
	};

	// children inherit the descriptor, not our buffer
	out.flush()?;
	match eval::eval(state, &pipeline) {
		Ok(status) => if let Some(head) = status.head() {
			writeln!(out, "exit status: {}", head)?;
		},
		Err(e) => {
			let _ = writeln!(io::stderr(), "rsh: {}", e);
		},
	}
	Ok(Flow::Continue)
}

/// Reads and dispatches lines until `exit` or end of input. Returns the
/// status the session ends with.
pub fn run<R: BufRead, W: Write>(state: &mut global::State, mut input: R, mut output: W) -> io::Result<i32> {
	loop {
		output.write_all(state.config.prompt.as_bytes())?;
		output.flush()?;

		let mut line: Vec<u8> = vec![];
		if input.read_until(b'\n', &mut line)? == 0 {
			writeln!(output)?;
			output.flush()?;
			return Ok(0);
		}
		let line = match String::from_utf8(line) {
			Ok(line) => line,
			Err(_) => {
				let _ = writeln!(io::stderr(), "rsh: input is not valid UTF-8");
				continue;
			},
		};

		match eval_line(state, &line, &mut output)? {
			Flow::Continue => {},
			Flow::Exit(code) => {
				output.flush()?;
				return Ok(code);
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::env::MapEnvironment;

	fn state() -> global::State {
		global::State::new(Box::new(MapEnvironment::new().with("RSH_PROMPT", "> ").with("PATH", "/usr/bin:/bin")))
	}

	#[test]
	fn eof_ends_session_with_zero() {
		let mut out = vec![];
		let code = run(&mut state(), &b""[..], &mut out).unwrap();
		assert_eq!(code, 0);
		assert_eq!(out, b"> \n");
	}

	#[test]
	fn exit_stops_reading() {
		let mut out = vec![];
		let code = run(&mut state(), &b"exit\ntrue\n"[..], &mut out).unwrap();
		assert_eq!(code, 0);
		assert_eq!(out, b"> ");
	}

	#[test]
	fn blank_and_malformed_lines_reprompt() {
		let mut out = vec![];
		run(&mut state(), &b"\n   \n| wc\n"[..], &mut out).unwrap();
		assert_eq!(out, b"> > > > \n");
	}

	#[test]
	fn reports_status_of_dispatched_command() {
		let mut out = vec![];
		run(&mut state(), &b"false\n"[..], &mut out).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "> exit status: 1\n> \n");
	}

	#[test]
	fn invalid_utf8_is_skipped() {
		let mut out = vec![];
		let code = run(&mut state(), &b"\xff\xfe\nexit\n"[..], &mut out).unwrap();
		assert_eq!(code, 0);
		assert_eq!(out, b"> > ");
	}
}
