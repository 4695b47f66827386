//! Word lookup against a live editor.

use std::sync::{Arc, LazyLock};

use hyperclick_primitives::{LineWord, Point, Range, default_word_pattern, word_at_column, word_pattern};
use parking_lot::Mutex;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::host::TextEditor;

/// A word found in an editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
	/// Matched text.
	pub text: String,
	/// Buffer range of the word.
	pub range: Range,
}

/// Finds the word at `position` in `editor`.
///
/// Uses `pattern` when given, otherwise a pattern built from the editor's
/// non-word characters.
pub fn word_at_position(editor: &dyn TextEditor, position: Point, pattern: Option<&Regex>) -> Option<WordMatch> {
	let line = editor.line_text(position.row)?;
	let found = match pattern {
		Some(pattern) => word_at_column(&line, position.column, pattern),
		None => match editor.non_word_characters().and_then(|chars| cached_word_pattern(&chars)) {
			Some(pattern) => word_at_column(&line, position.column, &pattern),
			None => word_at_column(&line, position.column, default_word_pattern()),
		},
	}?;
	let LineWord { text, start, end } = found;
	Some(WordMatch {
		text,
		range: Range::on_row(position.row, start, end),
	})
}

/// Compiled patterns keyed by non-word character set. `None` marks a set that
/// failed to compile.
static PATTERNS: LazyLock<Mutex<FxHashMap<String, Option<Arc<Regex>>>>> = LazyLock::new(Default::default);

fn cached_word_pattern(non_word_characters: &str) -> Option<Arc<Regex>> {
	let mut patterns = PATTERNS.lock();
	if let Some(cached) = patterns.get(non_word_characters) {
		return cached.clone();
	}
	let compiled = match word_pattern(non_word_characters) {
		Ok(pattern) => Some(Arc::new(pattern)),
		Err(error) => {
			tracing::warn!(%error, "hyperclick.word.bad_non_word_characters");
			None
		}
	};
	patterns.insert(non_word_characters.to_owned(), compiled.clone());
	compiled
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::FakeEditor;

	#[test]
	fn test_pattern_is_compiled_once_per_character_set() {
		let first = cached_word_pattern("#").unwrap();
		let second = cached_word_pattern("#").unwrap();
		assert!(Arc::ptr_eq(&first, &second));
		assert!(!Arc::ptr_eq(&first, &cached_word_pattern("#$").unwrap()));
	}

	#[test]
	fn test_editor_separators_split_words() {
		let editor = FakeEditor::with_non_word_characters(1, "foo-bar baz", "-");
		let found = word_at_position(&*editor, Point::new(0, 5), None).unwrap();
		assert_eq!(found.text, "bar");
		assert_eq!(found.range, Range::on_row(0, 4, 7));
	}

	#[test]
	fn test_long_line_word_lookup() {
		let editor = FakeEditor::with_non_word_characters(1, &"ab ".repeat(200_000), ".");
		let found = word_at_position(&*editor, Point::new(0, 599_997), None).unwrap();
		assert_eq!(found.range, Range::on_row(0, 599_997, 599_999));
	}
}
