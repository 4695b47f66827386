//! Pointer samples in, resolved suggestions out.
//!
//! [`PositionEventCoalescer`] turns the raw stream of positions (one per
//! mouse move or trigger key press, `None` when the trigger is released) into
//! a deduplicated stream of "current suggestion" values. Each pushed sample
//! goes through, in order:
//!
//! 1. a change filter dropping a sample equal to the previous one,
//! 2. a redundancy filter dropping a point still on the last word or inside
//!    the current suggestion,
//! 3. word range memoization for the next redundancy check,
//! 4. resolution: `None` clears at once, a point clears and starts a
//!    resolution wrapped in a [`LoadingScope`],
//! 5. output deduplication.
//!
//! Stages 1 to 4 run synchronously inside [`push`](PositionEventCoalescer::push).
//! Resolutions run as spawned tasks. Each one carries a [`GenerationToken`];
//! starting a new resolution cancels the previous token, and a finished
//! resolution publishes only while its generation is still the in-flight one.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use hyperclick_primitives::{ClientPoint, Point, Range};
use hyperclick_worker::{GenerationClock, GenerationToken, TaskClass};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::host::{EditorClass, MarkerId, TextEditor};
use crate::loading::{LOADING_DELAY, LoadingScope};
use crate::resolver::SuggestionResolver;
use crate::suggestion::Suggestion;
use crate::word::word_at_position;

/// Value published by the coalescer; `None` means nothing is navigable.
pub type CurrentSuggestion = Option<Arc<Suggestion>>;

/// Maps a pointer location to the buffer position hyperclick should query.
///
/// Returns `None` past the end of a screen line so trailing whitespace is
/// never queried. A host conversion failure is logged and degrades to the
/// start of the buffer.
pub fn position_for_pointer(editor: &dyn TextEditor, client: ClientPoint) -> Option<Point> {
	let screen = editor.screen_position_for_client(client);
	let line_len = editor.screen_line_len(screen.row).unwrap_or(0);
	if screen.column >= line_len {
		return None;
	}
	match editor.buffer_position_for_screen(screen) {
		Ok(position) => Some(position),
		Err(error) => {
			tracing::error!(editor = %editor.id(), %error, "hyperclick.position.conversion_failed");
			Some(Point::ZERO)
		}
	}
}

#[derive(Default)]
struct State {
	/// Last sample seen by the change filter; the outer `None` means none yet.
	last_position: Option<Option<Point>>,
	word_range: Option<Range>,
	in_flight: Option<GenerationToken>,
	loading: Option<LoadingScope>,
	markers: Vec<MarkerId>,
	disposed: bool,
}

struct Inner {
	editor: Arc<dyn TextEditor>,
	resolver: SuggestionResolver,
	clock: GenerationClock,
	state: Mutex<State>,
	output: watch::Sender<CurrentSuggestion>,
}

/// Per-editor suggestion pipeline.
///
/// Cloning yields another handle to the same pipeline.
#[derive(Clone)]
pub struct PositionEventCoalescer {
	inner: Arc<Inner>,
}

impl PositionEventCoalescer {
	/// Creates a pipeline for `editor` resolving through `resolver`.
	pub fn new(editor: Arc<dyn TextEditor>, resolver: SuggestionResolver) -> Self {
		let (output, _) = watch::channel(None);
		Self {
			inner: Arc::new(Inner {
				editor,
				resolver,
				clock: GenerationClock::new(),
				state: Mutex::new(State::default()),
				output,
			}),
		}
	}

	/// The editor this pipeline serves.
	pub fn editor(&self) -> &Arc<dyn TextEditor> {
		&self.inner.editor
	}

	/// Normalizes a pointer location and pushes the result.
	pub fn push_pointer(&self, client: ClientPoint) {
		self.push(position_for_pointer(self.inner.editor.as_ref(), client));
	}

	/// Feeds one sample into the pipeline.
	pub fn push(&self, position: Option<Point>) {
		let inner = &self.inner;
		let mut state = inner.state.lock();
		if state.disposed {
			return;
		}

		if state.last_position == Some(position) {
			tracing::trace!(?position, "hyperclick.coalesce.unchanged");
			return;
		}
		state.last_position = Some(position);

		if let Some(point) = position
			&& inner.is_redundant(&state, point)
		{
			tracing::trace!(%point, "hyperclick.coalesce.redundant");
			return;
		}

		state.word_range =
			position.and_then(|point| word_at_position(inner.editor.as_ref(), point, None).map(|w| w.range));

		if let Some(previous) = state.in_flight.take() {
			tracing::trace!(generation = previous.generation(), "hyperclick.coalesce.supersede");
			previous.cancel();
		}
		state.loading = None;

		let Some(point) = position else {
			inner.publish(&mut state, None);
			return;
		};

		let token = inner.clock.issue();
		state.in_flight = Some(token.clone());
		state.loading = Some(LoadingScope::begin(inner.editor.clone(), LOADING_DELAY));
		inner.publish(&mut state, None);
		drop(state);

		tracing::trace!(generation = token.generation(), %point, "hyperclick.resolve.start");
		drop(hyperclick_worker::spawn(
			TaskClass::Interactive,
			resolve_and_publish(inner.clone(), token, point),
		));
	}

	/// Pushes a release sample, clearing the visible suggestion.
	pub fn clear(&self) {
		self.push(None);
	}

	/// The most recently published value.
	pub fn current(&self) -> CurrentSuggestion {
		self.inner.output.borrow().clone()
	}

	/// A receiver observing every published value.
	pub fn subscribe(&self) -> watch::Receiver<CurrentSuggestion> {
		self.inner.output.subscribe()
	}

	/// Resolves with the next value published after this call.
	///
	/// The subscription is taken immediately, not when the future is first
	/// polled. Resolves to `None` if the pipeline is dropped first.
	pub fn next_suggestion(&self) -> impl Future<Output = CurrentSuggestion> + Send + 'static {
		let mut rx = self.inner.output.subscribe();
		async move {
			match rx.changed().await {
				Ok(()) => rx.borrow_and_update().clone(),
				Err(_) => None,
			}
		}
	}

	/// Stops the pipeline, cancels pending work and clears visual state.
	pub fn dispose(&self) {
		let inner = &self.inner;
		let mut state = inner.state.lock();
		if std::mem::replace(&mut state.disposed, true) {
			return;
		}
		if let Some(token) = state.in_flight.take() {
			token.cancel();
		}
		state.loading = None;
		inner.publish(&mut state, None);
		tracing::debug!(editor = %inner.editor.id(), "hyperclick.coalesce.disposed");
	}

	/// Returns true once [`dispose`](Self::dispose) has run.
	pub fn is_disposed(&self) -> bool {
		self.inner.state.lock().disposed
	}
}

impl fmt::Debug for PositionEventCoalescer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PositionEventCoalescer")
			.field("editor", &self.inner.editor.id())
			.field("current", &self.current())
			.finish_non_exhaustive()
	}
}

impl Inner {
	/// Word ranges cannot tell a gap between several ranges from the same
	/// word, so the word check only applies to single-range suggestions.
	fn is_redundant(&self, state: &State, point: Point) -> bool {
		let guard = self.output.borrow();
		let current = (*guard).as_deref();
		let multiple = current.is_some_and(|s| s.range().is_multiple());
		if !multiple && state.word_range.is_some_and(|word| word.contains_point(point)) {
			return true;
		}
		current.is_some_and(|s| s.range().contains_point(point))
	}

	fn publish(&self, state: &mut State, value: Option<Suggestion>) {
		let unchanged = (*self.output.borrow()).as_deref() == value.as_ref();
		if unchanged {
			return;
		}

		for marker in state.markers.drain(..) {
			self.editor.remove_highlight(marker);
		}
		match &value {
			Some(suggestion) => {
				self.editor.set_class(EditorClass::Navigable, true);
				state.markers = suggestion
					.range()
					.ranges()
					.iter()
					.map(|range| self.editor.add_highlight(*range))
					.collect();
			}
			None => self.editor.set_class(EditorClass::Navigable, false),
		}
		self.output.send_replace(value.map(Arc::new));
	}

	fn complete(&self, generation: u64, suggestion: Option<Suggestion>) {
		let mut state = self.state.lock();
		let in_flight = state.in_flight.as_ref().map(GenerationToken::generation);
		if state.disposed || in_flight != Some(generation) {
			tracing::trace!(generation, ?in_flight, "hyperclick.resolve.stale");
			return;
		}
		state.in_flight = None;
		self.publish(&mut state, suggestion);
		state.loading = None;
	}
}

async fn resolve_and_publish(inner: Arc<Inner>, token: GenerationToken, point: Point) {
	let outcome = tokio::select! {
		biased;
		_ = token.cancelled() => {
			tracing::trace!(generation = token.generation(), "hyperclick.resolve.cancelled");
			return;
		}
		outcome = inner.resolver.resolve(inner.editor.as_ref(), point) => outcome,
	};

	let suggestion = match outcome {
		Ok(suggestion) => suggestion,
		Err(error) => {
			tracing::error!(editor = %inner.editor.id(), %point, %error, "hyperclick.resolve.failed");
			None
		}
	};
	inner.complete(token.generation(), suggestion);
}
