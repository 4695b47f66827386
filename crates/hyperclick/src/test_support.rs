//! In-memory editor and scripted providers for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hyperclick_primitives::{ClientPoint, Point, Range};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::HostError;
use crate::host::{EditorClass, EditorId, MarkerId, TextEditor};
use crate::notice::Notifier;
use crate::provider::{PositionProvider, ProviderResult, WordProvider};
use crate::suggestion::Suggestion;
use crate::suggestion_list::{SuggestionListItem, SuggestionListView};

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Editor whose client coordinates map 1:1 onto screen and buffer points:
/// `x` is the column and `y` the row.
pub(crate) struct FakeEditor {
	id: EditorId,
	scope: String,
	non_word_characters: Option<String>,
	lines: Vec<String>,
	cursor: Mutex<Point>,
	next_marker: AtomicU64,
	markers: Mutex<FxHashMap<MarkerId, Range>>,
	classes: Mutex<FxHashSet<EditorClass>>,
	fail_conversion: AtomicBool,
}

impl FakeEditor {
	pub(crate) fn new(id: u64, text: &str) -> Arc<Self> {
		Self::with_scope(id, text, "source.test")
	}

	pub(crate) fn with_scope(id: u64, text: &str, scope: &str) -> Arc<Self> {
		Arc::new(Self {
			id: EditorId(id),
			scope: scope.to_owned(),
			non_word_characters: None,
			lines: text.split('\n').map(str::to_owned).collect(),
			cursor: Mutex::new(Point::ZERO),
			next_marker: AtomicU64::new(0),
			markers: Mutex::new(FxHashMap::default()),
			classes: Mutex::new(FxHashSet::default()),
			fail_conversion: AtomicBool::new(false),
		})
	}

	pub(crate) fn with_non_word_characters(id: u64, text: &str, chars: &str) -> Arc<Self> {
		let mut editor = Self::with_scope(id, text, "source.test");
		if let Some(editor) = Arc::get_mut(&mut editor) {
			editor.non_word_characters = Some(chars.to_owned());
		}
		editor
	}

	pub(crate) fn fail_conversions(&self) {
		self.fail_conversion.store(true, Ordering::SeqCst);
	}

	pub(crate) fn highlighted(&self) -> Vec<Range> {
		let mut ranges: Vec<_> = self.markers.lock().values().copied().collect();
		ranges.sort_by_key(|r| r.start);
		ranges
	}

	pub(crate) fn has_class(&self, class: EditorClass) -> bool {
		self.classes.lock().contains(&class)
	}
}

impl TextEditor for FakeEditor {
	fn id(&self) -> EditorId {
		self.id
	}

	fn grammar_scope(&self) -> String {
		self.scope.clone()
	}

	fn line_text(&self, row: u32) -> Option<String> {
		self.lines.get(row as usize).cloned()
	}

	fn non_word_characters(&self) -> Option<String> {
		self.non_word_characters.clone()
	}

	fn cursor_position(&self) -> Point {
		*self.cursor.lock()
	}

	fn set_cursor_position(&self, position: Point) {
		*self.cursor.lock() = position;
	}

	fn screen_position_for_client(&self, client: ClientPoint) -> Point {
		Point::new(client.y as u32, client.x as u32)
	}

	fn screen_line_len(&self, row: u32) -> Option<u32> {
		self.lines.get(row as usize).map(|l| l.chars().count() as u32)
	}

	fn buffer_position_for_screen(&self, screen: Point) -> Result<Point, HostError> {
		if self.fail_conversion.load(Ordering::SeqCst) {
			return Err(HostError::InvalidScreenPosition(screen));
		}
		Ok(screen)
	}

	fn add_highlight(&self, range: Range) -> MarkerId {
		let id = MarkerId(self.next_marker.fetch_add(1, Ordering::SeqCst));
		self.markers.lock().insert(id, range);
		id
	}

	fn remove_highlight(&self, marker: MarkerId) {
		self.markers.lock().remove(&marker);
	}

	fn set_class(&self, class: EditorClass, enabled: bool) {
		let mut classes = self.classes.lock();
		if enabled {
			classes.insert(class);
		} else {
			classes.remove(&class);
		}
	}
}

/// Position provider replaying a fixed answer and recording its calls.
#[derive(Clone, Default)]
pub(crate) struct SpyProvider {
	calls: Arc<Mutex<Vec<Point>>>,
	answer: Option<Suggestion>,
	delay: Option<Duration>,
	fail: bool,
}

impl SpyProvider {
	pub(crate) fn empty() -> Self {
		Self::default()
	}

	pub(crate) fn answering(suggestion: Suggestion) -> Self {
		Self {
			answer: Some(suggestion),
			..Self::default()
		}
	}

	pub(crate) fn failing() -> Self {
		Self {
			fail: true,
			..Self::default()
		}
	}

	pub(crate) fn delayed(self, delay: Duration) -> Self {
		Self {
			delay: Some(delay),
			..self
		}
	}

	pub(crate) fn calls(&self) -> Vec<Point> {
		self.calls.lock().clone()
	}

	pub(crate) fn call_count(&self) -> usize {
		self.calls.lock().len()
	}
}

#[async_trait]
impl PositionProvider for SpyProvider {
	async fn suggestion(&self, _editor: &dyn TextEditor, position: Point) -> ProviderResult {
		self.calls.lock().push(position);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		if self.fail {
			return Err("provider exploded".into());
		}
		Ok(self.answer.clone())
	}
}

/// Word provider answering only for one word.
#[derive(Clone)]
pub(crate) struct WordSpy {
	word: String,
	answer: Suggestion,
	seen: Arc<Mutex<Vec<(String, Range)>>>,
}

impl WordSpy {
	pub(crate) fn new(word: &str, answer: Suggestion) -> Self {
		Self {
			word: word.to_owned(),
			answer,
			seen: Arc::default(),
		}
	}

	pub(crate) fn seen(&self) -> Vec<(String, Range)> {
		self.seen.lock().clone()
	}
}

#[async_trait]
impl WordProvider for WordSpy {
	async fn suggestion_for_word(&self, _editor: &dyn TextEditor, word: &str, range: Range) -> ProviderResult {
		self.seen.lock().push((word.to_owned(), range));
		Ok((word == self.word).then(|| self.answer.clone()))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListEvent {
	Show {
		editor: EditorId,
		anchor: Point,
		titles: Vec<String>,
	},
	Selection(usize),
	Hide,
}

/// List view recording every call.
#[derive(Default)]
pub(crate) struct RecordingListView {
	events: Mutex<Vec<ListEvent>>,
}

impl RecordingListView {
	pub(crate) fn events(&self) -> Vec<ListEvent> {
		self.events.lock().clone()
	}
}

impl SuggestionListView for RecordingListView {
	fn show(&self, editor: EditorId, anchor: Point, items: &[SuggestionListItem]) {
		let titles = items.iter().map(|item| item.title.clone()).collect();
		self.events.lock().push(ListEvent::Show { editor, anchor, titles });
	}

	fn selection_changed(&self, index: usize) {
		self.events.lock().push(ListEvent::Selection(index));
	}

	fn hide(&self) {
		self.events.lock().push(ListEvent::Hide);
	}
}

/// Notifier keeping every (message, description) pair.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
	notices: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
	pub(crate) fn notices(&self) -> Vec<(String, String)> {
		self.notices.lock().clone()
	}
}

impl Notifier for RecordingNotifier {
	fn add_info(&self, message: &str, description: &str, _dismissable: bool) {
		self.notices.lock().push((message.to_owned(), description.to_owned()));
	}
}
