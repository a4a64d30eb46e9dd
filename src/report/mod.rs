//! Renderers for normalized issues.
//!
//! - [`json`] — the `result.json` contract consumed by the CI host; always written.
//! - [`terminal`] — optional colored summary table for humans.

pub mod json;
pub mod terminal;
