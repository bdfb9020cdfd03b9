//! Ability reconciliation
//!
//! Recomputes which ability spells an actor should hold from its equipped
//! weapons and brings the actor's spell list in line, including the single
//! light aura variant.

mod engine;

#[cfg(test)]
mod engine_tests;

pub use engine::{AuraGrant, ReconcileOutcome, ReconcileReport, ReconciliationEngine, SkipReason};
