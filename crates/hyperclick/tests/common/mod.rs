//! Host doubles for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use hyperclick::{
	ClientPoint, EditorClass, EditorId, HostError, MarkerId, Notifier, Point, Range, SuggestionListItem,
	SuggestionListView, TextEditor,
};
use parking_lot::Mutex;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Single-column-per-pixel editor: client `x` is the column, `y` the row.
pub struct TestEditor {
	id: EditorId,
	lines: Vec<String>,
	cursor: Mutex<Point>,
	next_marker: AtomicU64,
	highlights: Mutex<Vec<(MarkerId, Range)>>,
	classes: Mutex<Vec<EditorClass>>,
}

impl TestEditor {
	pub fn new(id: u64, text: &str) -> Arc<Self> {
		Arc::new(Self {
			id: EditorId(id),
			lines: text.lines().map(str::to_owned).collect(),
			cursor: Mutex::new(Point::ZERO),
			next_marker: AtomicU64::new(1),
			highlights: Mutex::new(Vec::new()),
			classes: Mutex::new(Vec::new()),
		})
	}

	pub fn highlights(&self) -> Vec<Range> {
		self.highlights.lock().iter().map(|(_, r)| *r).collect()
	}

	pub fn has_class(&self, class: EditorClass) -> bool {
		self.classes.lock().contains(&class)
	}
}

impl TextEditor for TestEditor {
	fn id(&self) -> EditorId {
		self.id
	}

	fn grammar_scope(&self) -> String {
		"text.plain".to_owned()
	}

	fn line_text(&self, row: u32) -> Option<String> {
		self.lines.get(row as usize).cloned()
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
		self.lines.get(row as usize).map(|line| line.chars().count() as u32)
	}

	fn buffer_position_for_screen(&self, screen: Point) -> Result<Point, HostError> {
		Ok(screen)
	}

	fn add_highlight(&self, range: Range) -> MarkerId {
		let id = MarkerId(self.next_marker.fetch_add(1, Ordering::Relaxed));
		self.highlights.lock().push((id, range));
		id
	}

	fn remove_highlight(&self, marker: MarkerId) {
		self.highlights.lock().retain(|(id, _)| *id != marker);
	}

	fn set_class(&self, class: EditorClass, enabled: bool) {
		let mut classes = self.classes.lock();
		classes.retain(|c| *c != class);
		if enabled {
			classes.push(class);
		}
	}
}

/// List view remembering the rows it was asked to show.
#[derive(Default)]
pub struct TestListView {
	shown: Mutex<Option<Vec<String>>>,
	selected: Mutex<usize>,
}

impl TestListView {
	pub fn shown(&self) -> Option<Vec<String>> {
		self.shown.lock().clone()
	}

	pub fn selected(&self) -> usize {
		*self.selected.lock()
	}
}

impl SuggestionListView for TestListView {
	fn show(&self, _editor: EditorId, _anchor: Point, items: &[SuggestionListItem]) {
		*self.shown.lock() = Some(items.iter().map(|i| i.title.clone()).collect());
		*self.selected.lock() = 0;
	}

	fn selection_changed(&self, index: usize) {
		*self.selected.lock() = index;
	}

	fn hide(&self) {
		*self.shown.lock() = None;
	}
}

#[derive(Default)]
pub struct CountingNotifier {
	pub count: AtomicUsize,
}

impl Notifier for CountingNotifier {
	fn add_info(&self, _message: &str, _description: &str, _dismissable: bool) {
		self.count.fetch_add(1, Ordering::SeqCst);
	}
}

/// Counter incremented by a suggestion callback.
pub fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
	let hits = Arc::new(AtomicUsize::new(0));
	let h = hits.clone();
	(hits, move || {
		h.fetch_add(1, Ordering::SeqCst);
	})
}
