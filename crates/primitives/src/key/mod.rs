//! Pointer and keyboard input events as delivered by the host view.

mod modifiers;

pub use modifiers::Modifiers;

/// Mouse button that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
	/// Primary button.
	#[default]
	Left,
	/// Middle button (wheel click).
	Middle,
	/// Secondary button.
	Right,
}

/// Pointer location in host view coordinates, before any text mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientPoint {
	/// Horizontal offset.
	pub x: f64,
	/// Vertical offset.
	pub y: f64,
}

impl ClientPoint {
	/// Creates a new client point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A mouse move, mouse down, or context menu event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
	/// Where the pointer is.
	pub client: ClientPoint,
	/// Button involved in the event; ignored for moves.
	pub button: MouseButton,
	/// Modifiers held at the time of the event.
	pub modifiers: Modifiers,
}

impl PointerEvent {
	/// Creates a left-button pointer event.
	pub const fn new(client: ClientPoint, modifiers: Modifiers) -> Self {
		Self {
			client,
			button: MouseButton::Left,
			modifiers,
		}
	}

	/// Returns a copy using `button`.
	pub const fn with_button(self, button: MouseButton) -> Self {
		Self { button, ..self }
	}
}

/// A key down or key up event.
///
/// Only the modifier state matters for triggering; the key itself is not
/// inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEvent {
	/// Modifiers held after the key transition.
	pub modifiers: Modifiers,
}

impl KeyEvent {
	/// Creates a key event with the given modifier state.
	pub const fn new(modifiers: Modifiers) -> Self {
		Self { modifiers }
	}
}
