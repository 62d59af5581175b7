//! Pagecraft Editor - Editing sessions for slot configurations.
//!
//! An editing session loads a page's document (draft, then published, then
//! defaults), tracks unsaved changes against the last saved snapshot,
//! mirrors styling across repeated elements, and drives the draft/publish
//! lifecycle through any [`SlotConfigurationService`].
//!
//! # Modules
//!
//! - [`editor`] - The editing session and flash messages
//! - [`changes`] - Unsaved change detection
//! - [`mirror`] - Mirrored edits across repeated elements
//! - [`autosave`] - Debounced auto-save
//! - [`pages`] - Per-page profiles and preview mock data
//! - [`client`] - HTTP request executor
//! - [`envelope`] - Response envelope decoding
//! - [`api`] - HTTP implementation of the service contract
//! - [`cache`] - TTL single-flight cache
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod autosave;
pub mod cache;
pub mod changes;
pub mod client;
pub mod config;
pub mod editor;
pub mod envelope;
pub mod error;
pub mod mirror;
pub mod pages;

#[cfg(test)]
mod testing;

pub use api::{HttpSlotConfigurationService, SlotConfigurationsApi};
pub use autosave::{AutoSaveEditor, Debouncer};
pub use cache::TtlCache;
pub use changes::ChangeTracker;
pub use client::{ApiClient, AuthMode, Resource};
pub use config::EditorConfig;
pub use editor::{EditorState, FlashKind, FlashMessage, LoadSource, SlotEditor};
pub use envelope::ApiEnvelope;
pub use error::{EditorError, EditorResult};
pub use mirror::{MirrorRules, SlotEdit};
pub use pages::{PageEditorProfile, PreviewContext};

pub use pagecraft_core::SlotConfigurationService;
