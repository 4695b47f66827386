//! Delayed loading indicator tied to one in-flight resolution.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use hyperclick_worker::TaskClass;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::host::{EditorClass, TextEditor};

/// How long a resolution may stay pending before the loading state shows.
pub const LOADING_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
struct Visual {
	closed: bool,
	shown: bool,
}

struct Shared {
	editor: Arc<dyn TextEditor>,
	visual: Mutex<Visual>,
}

impl Shared {
	fn show(&self) {
		let mut visual = self.visual.lock();
		if visual.closed || visual.shown {
			return;
		}
		visual.shown = true;
		tracing::trace!(editor = %self.editor.id(), "hyperclick.loading.show");
		self.editor.set_class(EditorClass::Loading, true);
	}

	fn close(&self) {
		let mut visual = self.visual.lock();
		visual.closed = true;
		if std::mem::take(&mut visual.shown) {
			tracing::trace!(editor = %self.editor.id(), "hyperclick.loading.hide");
			self.editor.set_class(EditorClass::Loading, false);
		}
	}
}

/// Handle of an open loading scope.
///
/// The editor gets [`EditorClass::Loading`] once the handle has stayed open
/// for the delay. Dropping the handle cancels the pending timer and removes
/// the class if it was applied.
pub struct LoadingScope {
	shared: Arc<Shared>,
	timer: CancellationToken,
}

impl LoadingScope {
	/// Opens a scope on `editor` that turns visible after `delay`.
	///
	/// Must be called from within a tokio runtime or falls back to the shared
	/// worker runtime.
	pub fn begin(editor: Arc<dyn TextEditor>, delay: Duration) -> Self {
		let shared = Arc::new(Shared {
			editor,
			visual: Mutex::new(Visual::default()),
		});
		let timer = CancellationToken::new();

		let task_shared = shared.clone();
		let task_timer = timer.clone();
		drop(hyperclick_worker::spawn(TaskClass::Background, async move {
			tokio::select! {
				biased;
				_ = task_timer.cancelled() => {}
				_ = tokio::time::sleep(delay) => task_shared.show(),
			}
		}));

		Self { shared, timer }
	}

	/// Returns true while the loading state is applied.
	pub fn is_shown(&self) -> bool {
		self.shared.visual.lock().shown
	}
}

impl Drop for LoadingScope {
	fn drop(&mut self) {
		self.timer.cancel();
		self.shared.close();
	}
}

impl fmt::Debug for LoadingScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadingScope")
			.field("editor", &self.shared.editor.id())
			.field("visual", &*self.shared.visual.lock())
			.finish()
	}
}
