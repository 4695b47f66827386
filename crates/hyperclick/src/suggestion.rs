//! Resolved navigation targets.

use std::fmt;
use std::sync::Arc;

use hyperclick_primitives::{Point, Range};

use crate::error::{HyperclickError, Result};

/// Zero-argument action run when a suggestion or candidate is confirmed.
pub type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Highlighted span(s) of a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionRange {
	/// One contiguous span.
	Single(Range),
	/// Several spans forming one logical target.
	Multiple(Vec<Range>),
}

impl SuggestionRange {
	/// Returns true for the multi-span form, even when it holds one span.
	pub fn is_multiple(&self) -> bool {
		matches!(self, Self::Multiple(_))
	}

	/// All spans in order.
	pub fn ranges(&self) -> &[Range] {
		match self {
			Self::Single(range) => std::slice::from_ref(range),
			Self::Multiple(ranges) => ranges,
		}
	}

	/// The first span.
	pub fn first(&self) -> Option<&Range> {
		self.ranges().first()
	}

	/// Returns true if any span contains `point`.
	pub fn contains_point(&self, point: Point) -> bool {
		self.ranges().iter().any(|range| range.contains_point(point))
	}
}

impl From<Range> for SuggestionRange {
	fn from(range: Range) -> Self {
		Self::Single(range)
	}
}

impl From<Vec<Range>> for SuggestionRange {
	fn from(ranges: Vec<Range>) -> Self {
		Self::Multiple(ranges)
	}
}

/// One entry of a multi-target suggestion.
#[derive(Clone)]
pub struct Candidate {
	/// Display title.
	pub title: String,
	/// Optional right-aligned label.
	pub right_label: Option<String>,
	/// Action run when this candidate is chosen.
	pub callback: Callback,
}

impl Candidate {
	/// Creates a candidate without a right label.
	pub fn new(title: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
		Self {
			title: title.into(),
			right_label: None,
			callback: Arc::new(callback),
		}
	}

	/// Returns a copy with a right-aligned label.
	pub fn with_right_label(self, label: impl Into<String>) -> Self {
		Self {
			right_label: Some(label.into()),
			..self
		}
	}
}

impl fmt::Debug for Candidate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Candidate")
			.field("title", &self.title)
			.field("right_label", &self.right_label)
			.finish_non_exhaustive()
	}
}

impl PartialEq for Candidate {
	fn eq(&self, other: &Self) -> bool {
		self.title == other.title
			&& self.right_label == other.right_label
			&& Arc::ptr_eq(&self.callback, &other.callback)
	}
}

/// What confirming a suggestion does.
#[derive(Clone)]
pub enum SuggestionAction {
	/// Run a single action directly.
	Callback(Callback),
	/// Let the user choose among candidates.
	Candidates(Vec<Candidate>),
}

impl fmt::Debug for SuggestionAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Callback(_) => f.write_str("Callback(..)"),
			Self::Candidates(candidates) => f.debug_tuple("Candidates").field(candidates).finish(),
		}
	}
}

impl PartialEq for SuggestionAction {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Callback(a), Self::Callback(b)) => Arc::ptr_eq(a, b),
			(Self::Candidates(a), Self::Candidates(b)) => a == b,
			_ => false,
		}
	}
}

/// A navigable target produced by a provider.
///
/// Always holds at least one range, and a candidate action always holds at
/// least one candidate. Two suggestions compare equal when their ranges match
/// and their actions share the same callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
	range: SuggestionRange,
	action: SuggestionAction,
}

impl Suggestion {
	/// Creates a suggestion, validating its invariants.
	pub fn new(range: impl Into<SuggestionRange>, action: SuggestionAction) -> Result<Self> {
		let range = range.into();
		if range.ranges().is_empty() {
			return Err(HyperclickError::EmptyRange);
		}
		if matches!(&action, SuggestionAction::Candidates(c) if c.is_empty()) {
			return Err(HyperclickError::EmptyCandidates);
		}
		Ok(Self { range, action })
	}

	/// Creates a single-range suggestion that runs `callback` on confirm.
	pub fn with_callback(range: Range, callback: impl Fn() + Send + Sync + 'static) -> Self {
		Self {
			range: SuggestionRange::Single(range),
			action: SuggestionAction::Callback(Arc::new(callback)),
		}
	}

	/// Creates a single-range suggestion offering `candidates`.
	pub fn with_candidates(range: Range, candidates: Vec<Candidate>) -> Result<Self> {
		Self::new(range, SuggestionAction::Candidates(candidates))
	}

	/// Highlighted span(s).
	pub fn range(&self) -> &SuggestionRange {
		&self.range
	}

	/// Confirmation action.
	pub fn action(&self) -> &SuggestionAction {
		&self.action
	}

	/// Candidates, if this suggestion offers a choice.
	pub fn candidates(&self) -> Option<&[Candidate]> {
		match &self.action {
			SuggestionAction::Candidates(candidates) => Some(candidates),
			SuggestionAction::Callback(_) => None,
		}
	}
}
