//! Word-boundary scanning within a single line.
//!
//! A "word" is whatever a pattern matches on the line. The default pattern
//! treats runs of characters that are neither whitespace nor one of
//! [`DEFAULT_NON_WORD_CHARACTERS`] as words, and additionally matches a whole
//! line consisting only of spaces and tabs so blank lines still produce a
//! (possibly empty) word.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that separate words when the editor supplies no override.
pub const DEFAULT_NON_WORD_CHARACTERS: &str = "/\\()\"':,.;<>~!@#$%^&*|+=[]{}`?-…";

static DEFAULT_WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	word_pattern(DEFAULT_NON_WORD_CHARACTERS).expect("default word pattern is valid")
});

/// Returns the shared pattern built from [`DEFAULT_NON_WORD_CHARACTERS`].
pub fn default_word_pattern() -> &'static Regex {
	&DEFAULT_WORD_PATTERN
}

/// Builds a word pattern treating `non_word_characters` as separators.
pub fn word_pattern(non_word_characters: &str) -> Result<Regex, regex::Error> {
	Regex::new(&format!(r"^[\t ]*$|[^\s{}]+", regex::escape(non_word_characters)))
}

/// A word found on a line, in character columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWord {
	/// Matched text.
	pub text: String,
	/// Start column (inclusive).
	pub start: u32,
	/// End column (exclusive).
	pub end: u32,
}

/// Finds the word under `column` on `line`.
///
/// A match whose span contains `column`, with both ends included, wins; the
/// scan stops at the first match ending after `column`. When the column sits
/// between two adjacent words the earlier word is returned.
pub fn word_at_column(line: &str, column: u32, pattern: &Regex) -> Option<LineWord> {
	let mut found = None;
	let mut cursor = (0usize, 0u32);
	for m in pattern.find_iter(line) {
		let start = cursor.1.saturating_add(char_len(&line[cursor.0..m.start()]));
		let end = start.saturating_add(char_len(m.as_str()));
		cursor = (m.end(), end);
		if start <= column && column <= end {
			found = Some(LineWord {
				text: m.as_str().to_owned(),
				start,
				end,
			});
		}
		if end > column {
			break;
		}
	}
	found
}

fn char_len(text: &str) -> u32 {
	u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}
