//! Per-editor event handling.
//!
//! The host forwards raw pointer and keyboard events of one editor to its
//! [`EditorBinding`]. The binding gates them on the trigger combination,
//! feeds the coalescer, and confirms suggestions on click.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use hyperclick_primitives::{ClientPoint, KeyEvent, Point, PointerEvent};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::coalesce::{CurrentSuggestion, PositionEventCoalescer, position_for_pointer};
use crate::confirm::SuggestionConfirmer;
use crate::error::Result;
use crate::host::{EditorId, TextEditor};
use crate::notice::TriggerConflictNotice;
use crate::resolver::SuggestionResolver;
use crate::trigger::{TriggerGate, is_multicursor_event};

/// Whether the host should keep dispatching an event.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
	/// Let the host handle the event as usual.
	Continue,
	/// Hyperclick consumed the event.
	Stop,
}

/// Hyperclick state bound to one live editor.
pub struct EditorBinding {
	editor: Arc<dyn TextEditor>,
	coalescer: PositionEventCoalescer,
	resolver: SuggestionResolver,
	gate: TriggerGate,
	confirmer: SuggestionConfirmer,
	notice: TriggerConflictNotice,
	last_pointer: Mutex<Option<ClientPoint>>,
}

impl EditorBinding {
	pub(crate) fn new(
		editor: Arc<dyn TextEditor>,
		resolver: SuggestionResolver,
		gate: TriggerGate,
		confirmer: SuggestionConfirmer,
		notice: TriggerConflictNotice,
	) -> Self {
		tracing::debug!(editor = %editor.id(), platform = %gate.platform(), "hyperclick.binding.new");
		Self {
			coalescer: PositionEventCoalescer::new(editor.clone(), resolver.clone()),
			editor,
			resolver,
			gate,
			confirmer,
			notice,
			last_pointer: Mutex::new(None),
		}
	}

	/// The bound editor's identity.
	pub fn id(&self) -> EditorId {
		self.editor.id()
	}

	/// The bound editor.
	pub fn editor(&self) -> &Arc<dyn TextEditor> {
		&self.editor
	}

	/// Mouse moved over the text.
	pub fn on_mouse_move(&self, event: &PointerEvent) {
		*self.last_pointer.lock() = Some(event.client);
		if self.gate.is_active(event.modifiers) {
			self.coalescer.push_pointer(event.client);
		} else {
			self.coalescer.clear();
		}
	}

	/// Mouse button pressed over the text.
	///
	/// Confirms the current suggestion when the last known pointer location
	/// lies inside it, moving the cursor there first.
	pub fn on_mouse_down(&self, event: &PointerEvent) -> Propagation {
		if !self.gate.is_active(event.modifiers) {
			return Propagation::Continue;
		}

		let mut propagation = Propagation::Continue;
		let platform = self.gate.platform();
		if is_multicursor_event(platform, event) {
			propagation = Propagation::Stop;
			self.notice.maybe_show(platform, self.gate.trigger_keys());
		}

		let Some(position) = self.position_at_last_pointer() else {
			return propagation;
		};
		let Some(suggestion) = self.coalescer.current() else {
			return propagation;
		};
		if !suggestion.range().contains_point(position) {
			return propagation;
		}

		self.editor.set_cursor_position(position);
		if let Err(error) = self.confirmer.confirm(self.id(), &suggestion) {
			tracing::error!(editor = %self.id(), %error, "hyperclick.binding.confirm_failed");
		}
		self.coalescer.clear();
		Propagation::Stop
	}

	/// A key went down; shows the suggestion under a resting pointer.
	pub fn on_key_down(&self, event: &KeyEvent) {
		if !self.gate.is_active(event.modifiers) {
			return;
		}
		let last = *self.last_pointer.lock();
		if let Some(client) = last {
			self.coalescer.push_pointer(client);
		}
	}

	/// A key went up; releasing the trigger clears the suggestion.
	pub fn on_key_up(&self, event: &KeyEvent) {
		if !self.gate.is_active(event.modifiers) {
			self.coalescer.clear();
		}
	}

	/// Context menu requested; suppressed while the trigger is held.
	pub fn on_context_menu(&self, event: &PointerEvent) -> Propagation {
		if self.gate.is_active(event.modifiers) {
			Propagation::Stop
		} else {
			Propagation::Continue
		}
	}

	/// The cursor moved; closes this editor's suggestion list.
	pub fn on_cursor_moved(&self) {
		self.confirmer.list().dismiss_for_editor(self.id());
	}

	/// The buffer changed; closes this editor's suggestion list.
	pub fn on_buffer_changed(&self) {
		self.confirmer.list().dismiss_for_editor(self.id());
	}

	/// Resolves at the cursor, outside the pointer pipeline, and confirms
	/// the result. Returns whether anything was confirmed.
	pub async fn confirm_at_cursor(&self) -> Result<bool> {
		let position = self.editor.cursor_position();
		let Some(suggestion) = self.resolver.resolve(self.editor.as_ref(), position).await? else {
			tracing::trace!(editor = %self.id(), %position, "hyperclick.binding.nothing_at_cursor");
			return Ok(false);
		};
		self.confirmer.confirm(self.id(), &suggestion)?;
		Ok(true)
	}

	/// Buffer position hyperclick would query for a pointer location.
	pub fn position_for_pointer(&self, client: ClientPoint) -> Option<Point> {
		position_for_pointer(self.editor.as_ref(), client)
	}

	fn position_at_last_pointer(&self) -> Option<Point> {
		let last = *self.last_pointer.lock();
		last.and_then(|client| self.position_for_pointer(client))
	}

	/// The suggestion currently shown.
	pub fn current_suggestion(&self) -> CurrentSuggestion {
		self.coalescer.current()
	}

	/// Resolves with the next published suggestion value.
	pub fn suggestion_at_mouse(&self) -> impl Future<Output = CurrentSuggestion> + Send + 'static {
		self.coalescer.next_suggestion()
	}

	/// A receiver observing every published suggestion value.
	pub fn subscribe(&self) -> watch::Receiver<CurrentSuggestion> {
		self.coalescer.subscribe()
	}

	/// Tears the binding down, clearing all visual state.
	pub fn dispose(&self) {
		self.coalescer.dispose();
		*self.last_pointer.lock() = None;
	}

	/// Returns true once disposed.
	pub fn is_disposed(&self) -> bool {
		self.coalescer.is_disposed()
	}
}

impl fmt::Debug for EditorBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EditorBinding")
			.field("editor", &self.id())
			.field("platform", &self.gate.platform())
			.field("last_pointer", &*self.last_pointer.lock())
			.finish_non_exhaustive()
	}
}
