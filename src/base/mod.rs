//! Foundation types for the synchronization engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`EntityId`] - Identifiers for semantic entities, visual entities and models
//! - [`LanguageString`] - Multilingual labels and descriptions
//! - [`EventEmitter`] - Publish/subscribe registry with explicit disposal
//!
//! This module has NO dependencies on other modelsync modules.

mod events;
mod id;
mod language;

pub use events::{EventEmitter, SubscriptionId};
pub use id::{EntityId, ModelId};
pub use language::{LanguageString, pick_language};
