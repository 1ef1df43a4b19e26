use crate::env::Environment;

pub const DEFAULT_PROMPT: &str = "rsh% ";
const PROMPT_KEY: &str = "RSH_PROMPT";
const PATH_KEY: &str = "PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub prompt: String,
	/// Colon-delimited executable search list, `None` when `PATH` is unset.
	pub search_path: Option<String>,
}

impl Config {
	pub fn from_env(env: &dyn Environment) -> Config {
		Config {
			prompt: env.var(PROMPT_KEY).unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
			search_path: env.var(PATH_KEY),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::env::MapEnvironment;

	#[test]
	fn defaults_when_unset() {
		let config = Config::from_env(&MapEnvironment::new());
		assert_eq!(config.prompt, DEFAULT_PROMPT);
		assert_eq!(config.search_path, None);
	}

	#[test]
	fn reads_prompt_and_path() {
		let env = MapEnvironment::new().with("RSH_PROMPT", "$ ").with("PATH", "/bin:/usr/bin");
		let config = Config::from_env(&env);
		assert_eq!(config.prompt, "$ ");
		assert_eq!(config.search_path.as_deref(), Some("/bin:/usr/bin"));
	}
}
