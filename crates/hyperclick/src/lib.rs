//! Jump to definition on click.
//!
//! Holding the trigger combination while hovering text asks registered
//! providers for a navigable target under the pointer; clicking it runs the
//! target's action or opens a list of candidates.
//!
//! The pieces, leaves first:
//!
//! * [`ProviderRegistry`] keeps [`Provider`]s ordered by priority.
//! * [`SuggestionResolver`] asks them in order for a [`Suggestion`].
//! * [`PositionEventCoalescer`] turns pointer samples into a deduplicated
//!   stream of suggestions, superseding outdated resolutions.
//! * [`LoadingScope`] shows a loading state for slow resolutions.
//! * [`TriggerGate`] decides which input events are active.
//! * [`SuggestionConfirmer`] runs a suggestion or opens the [`SuggestionList`].
//! * [`EditorBinding`] wires one editor's input events through all of it, and
//!   [`Hyperclick`] owns the bindings.
//!
//! The host application supplies editors through [`TextEditor`] and renders
//! through [`SuggestionListView`] and [`Notifier`].

#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod binding;
pub mod coalesce;
pub mod config;
pub mod confirm;
mod disposable;
pub mod error;
pub mod host;
pub mod loading;
pub mod notice;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod suggestion;
pub mod suggestion_list;
pub mod trigger;
pub mod word;

mod service;
#[cfg(test)]
mod test_support;

pub use binding::{EditorBinding, Propagation};
pub use coalesce::{CurrentSuggestion, PositionEventCoalescer, position_for_pointer};
pub use config::{ConfigHandle, HyperclickConfig};
pub use confirm::{Confirmation, SuggestionConfirmer};
pub use disposable::Disposable;
pub use error::{ConfigError, HostError, HyperclickError, ProviderError, Result};
pub use host::{EditorClass, EditorId, MarkerId, TextEditor};
pub use hyperclick_primitives::{ClientPoint, KeyEvent, Modifiers, MouseButton, Point, PointerEvent, Range};
pub use loading::{LOADING_DELAY, LoadingScope};
pub use notice::{MemoryNoticeStore, NoticeStore, Notifier, TriggerConflictNotice};
pub use provider::{Capability, EditorSelector, PositionProvider, Provider, ProviderBuilder, ProviderResult, WordProvider};
pub use registry::ProviderRegistry;
pub use resolver::SuggestionResolver;
pub use service::{Hyperclick, HyperclickServices};
pub use suggestion::{Callback, Candidate, Suggestion, SuggestionAction, SuggestionRange};
pub use suggestion_list::{SuggestionList, SuggestionListItem, SuggestionListView};
pub use trigger::{Platform, TriggerGate, TriggerKeys, TriggerOption, is_multicursor_event};
pub use word::{WordMatch, word_at_position};
