//! Data models for the board, its geometry, and translation results.
//!
//! This module contains all the core data structures used throughout the
//! application. Models are designed to be independent of UI and business logic.

pub mod grid;
pub mod symbol;
pub mod translation;

// Re-export all model types
pub use grid::GridLayout;
pub use symbol::{KeySet, KeySlot, SlotId, Symbol};
pub use translation::{ErrorDetail, TranslationResult, SCHEMA_VERSION};
