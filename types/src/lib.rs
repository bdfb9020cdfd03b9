//! Shared value types for Lumen.
//!
//! These types appear both in TOML rule files and in the reconciliation
//! core, so they live in a dependency-light crate of their own.

mod color;
mod form_id;
mod settings;

pub use color::LightColor;
pub use form_id::{FormId, Hand};
pub use settings::EngineSettings;
