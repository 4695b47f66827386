//! Core input and text coordinate types shared by the hyperclick crates.

pub mod key;
pub mod range;
pub mod word;

pub use key::{ClientPoint, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use range::{Point, Range};
pub use word::{DEFAULT_NON_WORD_CHARACTERS, LineWord, default_word_pattern, word_at_column, word_pattern};
