use std::io::{self, Write};
use std::process;

use rsh::env::ProcessEnvironment;
use rsh::global;
use rsh::repl;

fn main() {
	env_logger::init();

	let mut state = global::State::new(Box::new(ProcessEnvironment));
	log::debug!("search path: {:?}", state.search_path.dirs());

	let stdin = io::stdin();
	let code = match repl::run(&mut state, stdin.lock(), io::stdout()) {
		Ok(code) => code,
		Err(e) => {
			let _ = writeln!(io::stderr(), "rsh: {}", e);
			1
		},
	};
	process::exit(code)
}
