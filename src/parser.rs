use crate::error::{ParseError, ParseResult};
use crate::types::*;

const PIPE_SYMBOL: &str = "|";

struct Tokenizer<'a> {
	line: &'a str,
	i: usize,
}

impl<'a> Tokenizer<'a> {
	fn proceed_while<F>(&mut self, f: F) where F: Fn(u8) -> bool {
		while let Some(c) = self.line.as_bytes().get(self.i) {
			if !f(*c) { break; }
			self.i += 1;
		}
	}

	fn is_whitespace(c: u8) -> bool {
		matches!(c, b' ' | b'\t' | b'\n')
	}

	fn skip_whitespaces(&mut self) {
		self.proceed_while(Tokenizer::is_whitespace);
	}

	fn read_word(&mut self) -> &'a str {
		let orig = self.i;
		self.proceed_while(|c| !Tokenizer::is_whitespace(c));
		// delimiters are ASCII, so both ends sit on char boundaries
		&self.line[orig .. self.i]
	}
}

impl<'a> Iterator for Tokenizer<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		self.skip_whitespaces();
		let word = self.read_word();
		if word.is_empty() { None } else { Some(word) }
	}
}

/// Splits a line into whitespace-delimited words. No quoting or escaping.
pub fn tokenize(line: &str) -> Vec<String> {
	Tokenizer { line, i: 0 }.map(str::to_owned).collect()
}

/// Splits a token sequence on standalone `|` tokens. Segments may be empty.
pub fn split_pipeline(tokens: Vec<String>) -> Vec<Vec<String>> {
	let mut segments = vec![vec![]];
	for token in tokens {
		if token == PIPE_SYMBOL {
			segments.push(vec![]);
		} else if let Some(current) = segments.last_mut() {
			current.push(token);
		}
	}
	segments
}

/// Finds the first redirection symbol in `argv` and cuts the vector there.
///
/// Only the first symbol is honored. Its operand and every token after it,
/// later redirection symbols included, are discarded.
pub fn extract_redirect(argv: &mut Vec<String>) -> ParseResult<Option<Redirect>> {
	let found = argv.iter().enumerate()
		.find_map(|(i, token)| RedirectKind::from_symbol(token).map(|kind| (i, kind)));
	let (i, kind) = match found {
		Some(f) => f,
		None => return Ok(None),
	};
	let target = match argv.get(i + 1) {
		Some(target) => target.clone(),
		None => return Err(ParseError::MissingRedirectTarget(kind)),
	};
	let dropped = argv.split_off(i);
	if dropped.len() > 2 {
		log::debug!("ignoring tokens after redirection: {:?}", &dropped[2..]);
	}
	Ok(Some(Redirect { kind, target }))
}

fn parse_stage(mut argv: Vec<String>) -> ParseResult<Stage> {
	let redirect = extract_redirect(&mut argv)?;
	if argv.is_empty() {
		return Err(ParseError::EmptyCommand);
	}
	Ok(Stage { argv, redirect })
}

/// Builds a pipeline from already tokenized words; `None` when there are none.
pub fn parse_tokens(tokens: Vec<String>) -> ParseResult<Option<Pipeline>> {
	if tokens.is_empty() {
		return Ok(None);
	}
	let stages = split_pipeline(tokens).into_iter()
		.map(parse_stage)
		.collect::<ParseResult<Vec<Stage>>>()?;
	Ok(Some(Pipeline { stages }))
}

pub fn parse(line: &str) -> ParseResult<Option<Pipeline>> {
	parse_tokens(tokenize(line))
}
