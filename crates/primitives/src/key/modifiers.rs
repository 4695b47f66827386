//! Key modifier types (Shift, Ctrl, Alt, Meta).

/// Modifier keys held while an input event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt (Option on macOS) is held.
	pub alt: bool,
	/// Whether Meta (Command on macOS) is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		shift: false,
		ctrl: false,
		alt: false,
		meta: false,
	};

	/// Only Shift pressed.
	pub const SHIFT: Self = Self { shift: true, ..Self::NONE };

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Only Alt pressed.
	pub const ALT: Self = Self { alt: true, ..Self::NONE };

	/// Only Meta pressed.
	pub const META: Self = Self { meta: true, ..Self::NONE };

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.shift && !self.ctrl && !self.alt && !self.meta
	}
}
