//! Synthetic current-reading generation.

pub mod engine;
/// Per-category realistic current ranges.
pub mod profile;
/// Deterministic scripted demo timeline.
pub mod script;

// Re-export the main types for convenience
pub use engine::SimulationEngine;
pub use script::ScriptPhase;
