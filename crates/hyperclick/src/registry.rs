//! Provider registry ordered by descending priority.
//!
//! Readers take a lock-free snapshot; writers publish a new snapshot. Equal
//! priorities keep registration order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;

use crate::disposable::Disposable;
use crate::host::TextEditor;
use crate::provider::Provider;

#[derive(Debug, Clone)]
struct Entry {
	id: u64,
	provider: Arc<Provider>,
}

#[derive(Debug, Default)]
struct RegistryInner {
	next_id: AtomicU64,
	snap: ArcSwap<Vec<Entry>>,
}

/// Registered providers, shared by every editor binding.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
	inner: Arc<RegistryInner>,
}

impl ProviderRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `provider`; the returned disposable unregisters it.
	pub fn add_provider(&self, provider: Provider) -> Disposable {
		let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
		let provider = Arc::new(provider);
		let priority = provider.effective_priority();
		tracing::debug!(provider = provider.name(), priority, id, "hyperclick.registry.add");

		self.inner.snap.rcu(|current| {
			let mut next = current.to_vec();
			let index = next
				.iter()
				.position(|e| priority > e.provider.effective_priority())
				.unwrap_or(next.len());
			next.insert(
				index,
				Entry {
					id,
					provider: provider.clone(),
				},
			);
			next
		});

		let weak: Weak<RegistryInner> = Arc::downgrade(&self.inner);
		Disposable::new(move || {
			if let Some(inner) = weak.upgrade() {
				remove(&inner, id);
			}
		})
	}

	/// Providers applicable to `editor`, highest priority first.
	pub fn providers_for_editor(&self, editor: &dyn TextEditor) -> Vec<Arc<Provider>> {
		let scope = editor.grammar_scope();
		self.inner
			.snap
			.load()
			.iter()
			.filter(|e| e.provider.selector().matches(&scope))
			.map(|e| e.provider.clone())
			.collect()
	}

	/// Number of registered providers.
	pub fn len(&self) -> usize {
		self.inner.snap.load().len()
	}

	/// Returns true if no provider is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

fn remove(inner: &RegistryInner, id: u64) {
	inner.snap.rcu(|current| {
		current
			.iter()
			.filter(|e| e.id != id)
			.cloned()
			.collect::<Vec<_>>()
	});
	tracing::debug!(id, "hyperclick.registry.remove");
}
