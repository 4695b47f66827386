//! The host editor as seen by hyperclick.
//!
//! Rendering, event wiring and buffer storage belong to the host application.
//! [`TextEditor`] is the narrow surface the core needs from one live editor:
//! text queries, cursor access, view coordinate mapping, and the decorations
//! hyperclick toggles while the trigger is held.

use std::fmt;

use hyperclick_primitives::{ClientPoint, Point, Range};

use crate::error::HostError;

/// Identity of a live editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub u64);

impl fmt::Display for EditorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "editor#{}", self.0)
	}
}

/// Handle of a highlight marker created through [`TextEditor::add_highlight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Editor-wide visual states toggled by hyperclick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorClass {
	/// A navigable suggestion is under the pointer; show a pointer cursor.
	Navigable,
	/// A resolution has been pending for longer than the loading delay.
	Loading,
}

/// A live editor supplied by the host application.
pub trait TextEditor: Send + Sync {
	/// Stable identity for the lifetime of the editor.
	fn id(&self) -> EditorId;

	/// Grammar scope of the buffer, e.g. `source.rust`.
	fn grammar_scope(&self) -> String;

	/// Text of buffer row `row`, without the line terminator.
	fn line_text(&self, row: u32) -> Option<String>;

	/// Editor-specific characters that separate words, if they differ from
	/// [`hyperclick_primitives::DEFAULT_NON_WORD_CHARACTERS`].
	fn non_word_characters(&self) -> Option<String> {
		None
	}

	/// Current cursor position.
	fn cursor_position(&self) -> Point;

	/// Moves the cursor.
	fn set_cursor_position(&self, position: Point);

	/// Maps a pointer location to a screen position.
	fn screen_position_for_client(&self, client: ClientPoint) -> Point;

	/// Length in characters of screen row `row`, or `None` past the last row.
	fn screen_line_len(&self, row: u32) -> Option<u32>;

	/// Maps a screen position to a buffer position.
	fn buffer_position_for_screen(&self, screen: Point) -> Result<Point, HostError>;

	/// Highlights `range` and returns a handle for later removal.
	fn add_highlight(&self, range: Range) -> MarkerId;

	/// Removes a highlight created by [`add_highlight`](Self::add_highlight).
	fn remove_highlight(&self, marker: MarkerId);

	/// Turns an editor-wide visual state on or off.
	fn set_class(&self, class: EditorClass, enabled: bool);
}
