//! Translation request orchestration.
//!
//! This module owns the lifecycle of one translation request: submission,
//! the single in-flight remote call, settlement, and the state shown to the
//! presentation layer.

pub mod orchestrator;

// Re-export orchestrator types
pub use orchestrator::{OrchestratorState, RequestToken, TranslationOrchestrator};
