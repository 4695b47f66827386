use std::fmt;

/// Releases a registration or subscription exactly once.
///
/// Released on [`dispose`](Self::dispose) or when dropped. Use
/// [`detach`](Self::detach) to keep the guarded resource for the rest of the
/// process.
#[must_use = "dropping a Disposable releases what it guards"]
pub struct Disposable {
	release: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl Disposable {
	/// Creates a disposable running `release` once.
	pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// A disposable that guards nothing.
	pub fn empty() -> Self {
		Self { release: None }
	}

	/// Groups several disposables, released in order.
	pub fn composite(parts: Vec<Disposable>) -> Self {
		Self::new(move || {
			for mut part in parts {
				part.dispose();
			}
		})
	}

	/// Runs the release action if it has not run yet.
	pub fn dispose(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}

	/// Returns true once released or detached.
	pub fn is_disposed(&self) -> bool {
		self.release.is_none()
	}

	/// Gives up the release action without running it.
	pub fn detach(mut self) {
		self.release = None;
	}
}

impl Drop for Disposable {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl fmt::Debug for Disposable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Disposable")
			.field("disposed", &self.is_disposed())
			.finish()
	}
}
