//! The hyperclick service: provider registration, editor observation and
//! programmatic queries.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use hyperclick_primitives::Point;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::binding::EditorBinding;
use crate::config::ConfigHandle;
use crate::confirm::SuggestionConfirmer;
use crate::disposable::Disposable;
use crate::error::Result;
use crate::host::{EditorId, TextEditor};
use crate::notice::{MemoryNoticeStore, NoticeStore, Notifier, TriggerConflictNotice};
use crate::provider::Provider;
use crate::registry::ProviderRegistry;
use crate::resolver::SuggestionResolver;
use crate::suggestion::Suggestion;
use crate::suggestion_list::{SuggestionList, SuggestionListView};
use crate::trigger::{Platform, TriggerGate};

/// Host collaborators handed to [`Hyperclick::new`].
pub struct HyperclickServices {
	/// Live configuration shared by every binding.
	pub config: ConfigHandle,
	/// Platform whose trigger setting applies.
	pub platform: Platform,
	/// Renderer of the candidate list.
	pub list_view: Arc<dyn SuggestionListView>,
	/// Notification surface for the trigger conflict warning.
	pub notifier: Arc<dyn Notifier>,
	/// Where the "warning already shown" flag lives.
	pub notice_store: Arc<dyn NoticeStore>,
}

impl HyperclickServices {
	/// Services for the current platform with default configuration and an
	/// in-memory notice store.
	pub fn new(list_view: Arc<dyn SuggestionListView>, notifier: Arc<dyn Notifier>) -> Self {
		Self {
			config: ConfigHandle::default(),
			platform: Platform::current(),
			list_view,
			notifier,
			notice_store: Arc::new(MemoryNoticeStore::default()),
		}
	}

	/// Uses `config` instead of the default.
	pub fn with_config(self, config: ConfigHandle) -> Self {
		Self { config, ..self }
	}

	/// Reads the trigger setting of `platform`.
	pub fn with_platform(self, platform: Platform) -> Self {
		Self { platform, ..self }
	}

	/// Persists the notice flag in `store`.
	pub fn with_notice_store(self, notice_store: Arc<dyn NoticeStore>) -> Self {
		Self { notice_store, ..self }
	}
}

struct BindingSlot {
	serial: u64,
	binding: Arc<EditorBinding>,
}

struct Inner {
	registry: ProviderRegistry,
	resolver: SuggestionResolver,
	config: ConfigHandle,
	platform: Platform,
	list: Arc<SuggestionList>,
	notice: TriggerConflictNotice,
	bindings: Mutex<FxHashMap<EditorId, BindingSlot>>,
	next_serial: AtomicU64,
	disposed: AtomicBool,
}

/// Entry point of the feature.
///
/// Cloning yields another handle to the same service.
#[derive(Clone)]
pub struct Hyperclick {
	inner: Arc<Inner>,
}

impl Hyperclick {
	/// Creates the service.
	pub fn new(services: HyperclickServices) -> Self {
		let HyperclickServices {
			config,
			platform,
			list_view,
			notifier,
			notice_store,
		} = services;
		let registry = ProviderRegistry::new();
		Self {
			inner: Arc::new(Inner {
				resolver: SuggestionResolver::new(registry.clone()),
				registry,
				config,
				platform,
				list: Arc::new(SuggestionList::new(list_view)),
				notice: TriggerConflictNotice::new(notifier, notice_store),
				bindings: Mutex::new(FxHashMap::default()),
				next_serial: AtomicU64::new(0),
				disposed: AtomicBool::new(false),
			}),
		}
	}

	/// Registers a provider; the disposable unregisters it.
	pub fn add_provider(&self, provider: Provider) -> Disposable {
		self.inner.registry.add_provider(provider)
	}

	/// Registers several providers under one disposable.
	pub fn add_providers(&self, providers: impl IntoIterator<Item = Provider>) -> Disposable {
		Disposable::composite(providers.into_iter().map(|p| self.add_provider(p)).collect())
	}

	/// Registers a provider from the older API, where priority was optional
	/// and defaulted to 0.
	pub fn add_legacy_provider(&self, provider: Provider) -> Disposable {
		self.add_provider(provider.into_legacy())
	}

	/// Registers several older-API providers under one disposable.
	pub fn add_legacy_providers(&self, providers: impl IntoIterator<Item = Provider>) -> Disposable {
		Disposable::composite(providers.into_iter().map(|p| self.add_legacy_provider(p)).collect())
	}

	/// Binds hyperclick to `editor`.
	///
	/// Observing an editor that is already bound replaces its binding. The
	/// disposable tears down only the binding it created.
	///
	/// The binding lives until the disposable is released or the host reports
	/// the editor gone through [`Hyperclick::on_editor_destroyed`].
	pub fn observe_text_editor(&self, editor: Arc<dyn TextEditor>) -> Disposable {
		let inner = &self.inner;
		let id = editor.id();
		if inner.disposed.load(Ordering::Acquire) {
			tracing::warn!(editor = %id, "hyperclick.observe.after_dispose");
			return Disposable::empty();
		}

		let serial = inner.next_serial.fetch_add(1, Ordering::Relaxed);
		let binding = Arc::new(EditorBinding::new(
			editor,
			inner.resolver.clone(),
			TriggerGate::new(inner.platform, inner.config.subscribe()),
			SuggestionConfirmer::new(inner.list.clone()),
			inner.notice.clone(),
		));
		let previous = inner.bindings.lock().insert(id, BindingSlot { serial, binding });
		if let Some(previous) = previous {
			tracing::debug!(editor = %id, "hyperclick.observe.replace");
			previous.binding.dispose();
		}

		let weak: Weak<Inner> = Arc::downgrade(inner);
		Disposable::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			let removed = {
				let mut bindings = inner.bindings.lock();
				match bindings.get(&id) {
					Some(slot) if slot.serial == serial => bindings.remove(&id),
					_ => None,
				}
			};
			if let Some(slot) = removed {
				tracing::debug!(editor = %id, "hyperclick.observe.release");
				slot.binding.dispose();
			}
		})
	}

	/// Tears down the binding of a destroyed editor and closes its list.
	///
	/// Outstanding disposables for the editor become no-ops.
	pub fn on_editor_destroyed(&self, id: EditorId) {
		let removed = self.inner.bindings.lock().remove(&id);
		self.inner.list.dismiss_for_editor(id);
		if let Some(slot) = removed {
			tracing::debug!(editor = %id, "hyperclick.editor.destroyed");
			slot.binding.dispose();
		}
	}

	/// The binding of editor `id`, if observed.
	pub fn binding(&self, id: EditorId) -> Option<Arc<EditorBinding>> {
		self.inner.bindings.lock().get(&id).map(|slot| slot.binding.clone())
	}

	/// Number of bound editors.
	pub fn binding_count(&self) -> usize {
		self.inner.bindings.lock().len()
	}

	/// Resolves at `position` directly, bypassing the pointer pipeline.
	pub async fn get_suggestion(&self, editor: &dyn TextEditor, position: Point) -> Result<Option<Suggestion>> {
		self.inner.resolver.resolve(editor, position).await
	}

	/// Opens the candidate list of `suggestion` for `editor`.
	pub fn show_suggestion_list(&self, editor: EditorId, suggestion: &Suggestion) -> Result<()> {
		self.inner.list.show(editor, suggestion)
	}

	/// The shared candidate list.
	pub fn suggestion_list(&self) -> &Arc<SuggestionList> {
		&self.inner.list
	}

	/// The provider registry.
	pub fn registry(&self) -> &ProviderRegistry {
		&self.inner.registry
	}

	/// The live configuration.
	pub fn config(&self) -> &ConfigHandle {
		&self.inner.config
	}

	/// Hides the list and disposes every binding. Later observations are
	/// ignored.
	pub fn dispose(&self) {
		let inner = &self.inner;
		if inner.disposed.swap(true, Ordering::AcqRel) {
			return;
		}
		inner.list.cancel();
		let bindings: Vec<_> = inner.bindings.lock().drain().map(|(_, slot)| slot.binding).collect();
		tracing::debug!(bindings = bindings.len(), "hyperclick.dispose");
		for binding in bindings {
			binding.dispose();
		}
	}
}

impl fmt::Debug for Hyperclick {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Hyperclick")
			.field("platform", &self.inner.platform)
			.field("providers", &self.inner.registry.len())
			.field("bindings", &self.binding_count())
			.finish_non_exhaustive()
	}
}
