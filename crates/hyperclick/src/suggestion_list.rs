//! Keyboard-navigable choice list for multi-candidate suggestions.
//!
//! [`SuggestionList`] is the model; rendering belongs to the host through
//! [`SuggestionListView`]. At most one list is open at a time.

use std::fmt;
use std::sync::Arc;

use hyperclick_primitives::Point;
use parking_lot::Mutex;

use crate::error::{HyperclickError, Result};
use crate::host::EditorId;
use crate::suggestion::{Candidate, Suggestion};

/// Display data for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionListItem {
	/// Row title.
	pub title: String,
	/// Optional right-aligned label.
	pub right_label: Option<String>,
}

impl From<&Candidate> for SuggestionListItem {
	fn from(candidate: &Candidate) -> Self {
		Self {
			title: candidate.title.clone(),
			right_label: candidate.right_label.clone(),
		}
	}
}

/// Host-side renderer of the list.
pub trait SuggestionListView: Send + Sync {
	/// Renders `items` for `editor`, anchored at buffer position `anchor`,
	/// with the first row selected.
	fn show(&self, editor: EditorId, anchor: Point, items: &[SuggestionListItem]);

	/// Moves the visible selection to row `index`.
	fn selection_changed(&self, index: usize);

	/// Removes the list from view.
	fn hide(&self);
}

struct OpenList {
	editor: EditorId,
	candidates: Vec<Candidate>,
	selected: usize,
}

/// The open candidate list, if any.
pub struct SuggestionList {
	view: Arc<dyn SuggestionListView>,
	open: Mutex<Option<OpenList>>,
}

impl SuggestionList {
	/// Creates a closed list rendering through `view`.
	pub fn new(view: Arc<dyn SuggestionListView>) -> Self {
		Self {
			view,
			open: Mutex::new(None),
		}
	}

	/// Opens the list for `suggestion`'s candidates, replacing any open list.
	///
	/// Fails with [`HyperclickError::NotACandidateList`] when the suggestion
	/// runs a single action.
	pub fn show(&self, editor: EditorId, suggestion: &Suggestion) -> Result<()> {
		let candidates = suggestion.candidates().ok_or(HyperclickError::NotACandidateList)?;
		let anchor = suggestion
			.range()
			.first()
			.map(|range| range.start)
			.ok_or(HyperclickError::EmptyRange)?;
		let items: Vec<SuggestionListItem> = candidates.iter().map(SuggestionListItem::from).collect();

		let previous = self.open.lock().replace(OpenList {
			editor,
			candidates: candidates.to_vec(),
			selected: 0,
		});
		if let Some(previous) = previous {
			tracing::debug!(editor = %previous.editor, "hyperclick.list.replace");
			self.view.hide();
		}
		tracing::debug!(%editor, %anchor, items = items.len(), "hyperclick.list.show");
		self.view.show(editor, anchor, &items);
		Ok(())
	}

	/// Returns true while a list is open.
	pub fn is_open(&self) -> bool {
		self.open.lock().is_some()
	}

	/// Editor owning the open list.
	pub fn editor(&self) -> Option<EditorId> {
		self.open.lock().as_ref().map(|list| list.editor)
	}

	/// Selected row of the open list.
	pub fn selected_index(&self) -> Option<usize> {
		self.open.lock().as_ref().map(|list| list.selected)
	}

	/// Selects the previous row, wrapping from the first to the last.
	pub fn move_up(&self) {
		self.navigate(|selected, len| selected.checked_sub(1).unwrap_or(len - 1));
	}

	/// Selects the next row, wrapping from the last to the first.
	pub fn move_down(&self) {
		self.navigate(|selected, len| (selected + 1) % len);
	}

	/// Selects the first row.
	pub fn move_to_top(&self) {
		self.navigate(|_, _| 0);
	}

	/// Selects the last row.
	pub fn move_to_bottom(&self) {
		self.navigate(|_, len| len - 1);
	}

	/// Selects row `index`; returns false if no list is open or it is out of range.
	pub fn select(&self, index: usize) -> bool {
		let mut hit = false;
		self.navigate(|selected, len| {
			hit = index < len;
			if hit { index } else { selected }
		});
		hit
	}

	fn navigate(&self, next: impl FnOnce(usize, usize) -> usize) {
		let changed = {
			let mut open = self.open.lock();
			let Some(list) = open.as_mut() else {
				return;
			};
			let index = next(list.selected, list.candidates.len());
			(index != list.selected).then(|| {
				list.selected = index;
				index
			})
		};
		if let Some(index) = changed {
			self.view.selection_changed(index);
		}
	}

	/// Runs the selected candidate's callback and closes the list.
	///
	/// Returns false if no list was open.
	pub fn confirm(&self) -> bool {
		let Some(list) = self.open.lock().take() else {
			return false;
		};
		let Some(candidate) = list.candidates.get(list.selected) else {
			self.view.hide();
			return false;
		};
		tracing::debug!(editor = %list.editor, title = %candidate.title, "hyperclick.list.confirm");
		(candidate.callback)();
		self.view.hide();
		true
	}

	/// Closes the list without running anything.
	pub fn cancel(&self) {
		if self.open.lock().take().is_some() {
			tracing::trace!("hyperclick.list.cancel");
			self.view.hide();
		}
	}

	/// Closes the list if `editor` owns it; call on cursor moves and buffer edits.
	pub fn dismiss_for_editor(&self, editor: EditorId) {
		let dismissed = {
			let mut open = self.open.lock();
			match open.as_ref() {
				Some(list) if list.editor == editor => open.take().is_some(),
				_ => false,
			}
		};
		if dismissed {
			tracing::trace!(%editor, "hyperclick.list.dismiss");
			self.view.hide();
		}
	}
}

impl fmt::Debug for SuggestionList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SuggestionList")
			.field("editor", &self.editor())
			.field("selected", &self.selected_index())
			.finish_non_exhaustive()
	}
}
