use crate::config::Config;
use crate::env::Environment;
use crate::search::SearchPath;

/// Session state shared by every prompt cycle.
pub struct State {
	pub config: Config,
	pub search_path: SearchPath,
	pub env: Box<dyn Environment>,
}

impl State {
	pub fn new(env: Box<dyn Environment>) -> State {
		let config = Config::from_env(&*env);
		let search_path = SearchPath::new(config.search_path.as_deref());
		State { config, search_path, env }
	}
}
