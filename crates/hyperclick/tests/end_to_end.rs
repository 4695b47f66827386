#![allow(unused_crate_dependencies)]

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{CountingNotifier, TestEditor, TestListView, counter, init_tracing};
use hyperclick::{
	Candidate, ClientPoint, EditorClass, Hyperclick, HyperclickServices, Modifiers, Platform, Point, PointerEvent,
	PositionProvider, Propagation, Provider, ProviderResult, Range, Suggestion, TextEditor, WordProvider,
};

fn service() -> (Hyperclick, Arc<TestListView>) {
	init_tracing();
	let view = Arc::new(TestListView::default());
	let services =
		HyperclickServices::new(view.clone(), Arc::new(CountingNotifier::default())).with_platform(Platform::Win32);
	(Hyperclick::new(services), view)
}

fn ctrl_at(row: u32, column: u32) -> PointerEvent {
	PointerEvent::new(ClientPoint::new(f64::from(column), f64::from(row)), Modifiers::CTRL)
}

struct TestWord {
	suggestion: Suggestion,
}

#[async_trait]
impl WordProvider for TestWord {
	async fn suggestion_for_word(&self, _editor: &dyn TextEditor, word: &str, range: Range) -> ProviderResult {
		let on_word = word == "test" && range == Range::on_row(0, 0, 4);
		Ok(on_word.then(|| self.suggestion.clone()))
	}
}

struct Fixed {
	answer: Option<Suggestion>,
	calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PositionProvider for Fixed {
	async fn suggestion(&self, _editor: &dyn TextEditor, _position: Point) -> ProviderResult {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.answer.clone())
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn word_provider_suggestion_is_shown_and_confirmed_by_click() {
	let (hyperclick, _) = service();
	let (hits, callback) = counter();
	let _provider = hyperclick.add_provider(Provider::word(
		"test-word",
		TestWord {
			suggestion: Suggestion::with_callback(Range::on_row(0, 0, 4), callback),
		},
	));
	let editor = TestEditor::new(1, "test");
	let _observed = hyperclick.observe_text_editor(editor.clone());
	let binding = hyperclick.binding(editor.id()).expect("editor is bound");

	let next = binding.suggestion_at_mouse();
	binding.on_mouse_move(&ctrl_at(0, 0));
	let suggestion = next.await.expect("a suggestion under the pointer");

	assert_eq!(suggestion.range().ranges(), &[Range::on_row(0, 0, 4)]);
	assert_eq!(editor.highlights(), vec![Range::on_row(0, 0, 4)]);
	assert!(editor.has_class(EditorClass::Navigable));

	assert_eq!(binding.on_mouse_down(&ctrl_at(0, 0)), Propagation::Stop);
	assert_eq!(hits.load(Ordering::SeqCst), 1);
	assert!(editor.highlights().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn lower_priority_answer_surfaces_when_higher_is_empty() {
	let (hyperclick, _) = service();
	let high_calls = Arc::new(AtomicUsize::new(0));
	let low_calls = Arc::new(AtomicUsize::new(0));
	let answer = Suggestion::with_callback(Range::on_row(0, 0, 4), || {});
	let _providers = hyperclick.add_providers([
		Provider::position(
			"low",
			Fixed {
				answer: Some(answer.clone()),
				calls: low_calls.clone(),
			},
		)
		.with_priority(1),
		Provider::position(
			"high",
			Fixed {
				answer: None,
				calls: high_calls.clone(),
			},
		)
		.with_priority(10),
	]);
	let editor = TestEditor::new(1, "test");

	let found = hyperclick.get_suggestion(editor.as_ref(), Point::ZERO).await.unwrap();

	assert_eq!(found, Some(answer));
	assert_eq!(high_calls.load(Ordering::SeqCst), 1);
	assert_eq!(low_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn candidates_wait_in_list_until_chosen() {
	let (hyperclick, view) = service();
	let hits: Vec<Arc<AtomicUsize>> = (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
	let candidates = hits
		.iter()
		.enumerate()
		.map(|(i, hit)| {
			let hit = hit.clone();
			Candidate::new(format!("definition {i}"), move || {
				hit.fetch_add(1, Ordering::SeqCst);
			})
			.with_right_label(format!("file{i}.rs"))
		})
		.collect();
	let suggestion = Suggestion::with_candidates(Range::on_row(0, 0, 4), candidates).unwrap();
	let _provider = hyperclick.add_provider(Provider::position(
		"many",
		Fixed {
			answer: Some(suggestion),
			calls: Arc::default(),
		},
	));
	let editor = TestEditor::new(1, "test");
	let _observed = hyperclick.observe_text_editor(editor.clone());
	let binding = hyperclick.binding(editor.id()).unwrap();

	binding.on_mouse_move(&ctrl_at(0, 1));
	tokio::time::sleep(Duration::from_millis(1)).await;
	assert_eq!(binding.on_mouse_down(&ctrl_at(0, 1)), Propagation::Stop);

	assert_eq!(
		view.shown(),
		Some(vec!["definition 0".to_owned(), "definition 1".to_owned(), "definition 2".to_owned()])
	);
	assert!(hits.iter().all(|h| h.load(Ordering::SeqCst) == 0));

	let list = hyperclick.suggestion_list();
	list.move_down();
	assert_eq!(view.selected(), 1);
	assert!(list.confirm());

	assert_eq!(hits[1].load(Ordering::SeqCst), 1);
	assert_eq!(hits[0].load(Ordering::SeqCst) + hits[2].load(Ordering::SeqCst), 0);
	assert_eq!(view.shown(), None);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_provider_shows_loading_then_result() {
	struct Slow;

	#[async_trait]
	impl PositionProvider for Slow {
		async fn suggestion(&self, _editor: &dyn TextEditor, position: Point) -> ProviderResult {
			tokio::time::sleep(Duration::from_millis(600)).await;
			Ok(Some(Suggestion::with_callback(Range::point(position), || {})))
		}
	}

	let (hyperclick, _) = service();
	let _provider = hyperclick.add_provider(Provider::position("slow", Slow));
	let editor = TestEditor::new(1, "one two");
	let _observed = hyperclick.observe_text_editor(editor.clone());
	let binding = hyperclick.binding(editor.id()).unwrap();

	binding.on_mouse_move(&ctrl_at(0, 5));
	tokio::time::sleep(Duration::from_millis(300)).await;
	assert!(editor.has_class(EditorClass::Loading));
	assert!(binding.current_suggestion().is_none());

	tokio::time::sleep(Duration::from_millis(400)).await;
	assert!(!editor.has_class(EditorClass::Loading));
	assert!(binding.current_suggestion().is_some());
}
