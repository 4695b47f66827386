//! Acting on a suggestion the user committed to.

use std::sync::Arc;

use crate::error::Result;
use crate::host::EditorId;
use crate::suggestion::{Suggestion, SuggestionAction};
use crate::suggestion_list::SuggestionList;

/// What confirming a suggestion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
	/// The single action ran.
	Invoked,
	/// The candidates were handed to the suggestion list.
	ListShown,
}

/// Runs a suggestion's action or opens its candidate list.
#[derive(Debug, Clone)]
pub struct SuggestionConfirmer {
	list: Arc<SuggestionList>,
}

impl SuggestionConfirmer {
	/// Creates a confirmer presenting candidates through `list`.
	pub fn new(list: Arc<SuggestionList>) -> Self {
		Self { list }
	}

	/// The list candidates are presented in.
	pub fn list(&self) -> &Arc<SuggestionList> {
		&self.list
	}

	/// Confirms `suggestion` on behalf of `editor`.
	pub fn confirm(&self, editor: EditorId, suggestion: &Suggestion) -> Result<Confirmation> {
		match suggestion.action() {
			SuggestionAction::Callback(callback) => {
				tracing::debug!(%editor, "hyperclick.confirm.invoke");
				callback();
				Ok(Confirmation::Invoked)
			}
			SuggestionAction::Candidates(_) => {
				self.list.show(editor, suggestion)?;
				Ok(Confirmation::ListShown)
			}
		}
	}
}
