//! Pagecraft Core - Shared slot configuration types.
//!
//! This crate provides the types used across all Pagecraft components:
//! - `server` - HTTP service storing drafts and published configurations
//! - `editor` - Client-side editing sessions for the page editors
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and traits - no
//! network or database I/O. The [`service::SlotConfigurationService`] trait
//! is the contract between editors and storage; [`memory::MemorySlotStore`]
//! implements it in process.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, page types, stores, translations, prices
//! - [`configuration`] - The slot configuration document
//! - [`defaults`] - Built-in default slot sets per page type
//! - [`lifecycle`] - Draft/publish metadata stamping rules
//! - [`service`] - The service contract
//! - [`memory`] - In-memory service implementation
//! - [`error`] - Service errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod configuration;
pub mod defaults;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod service;
pub mod types;

pub use configuration::{
    ColSpan, ConfigurationMetadata, Position, PublishedVersion, Slot, SlotConfiguration, SlotKind,
    ValidationError, VersionSummary, ViewMode,
};
pub use error::{ServiceError, ServiceResult};
pub use memory::MemorySlotStore;
pub use service::SlotConfigurationService;
pub use types::*;
