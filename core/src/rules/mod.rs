//! Swap rule configuration
//!
//! This module provides:
//! - **Definitions**: Swap rules mapping a weapon + enchantment to per-hand
//!   ability spells, plus the light aura forms (loaded from TOML)
//! - **Store**: The [`RuleStore`] query interface the reconciliation engine
//!   consumes, and the indexed [`SwapRuleSet`] implementation
//! - **Config loading**: Builtin and custom rule directories
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SwapRule (TOML config)                       │
//! │  "Enchantment 0x0100 on any sword grants 0x0300 in right hand"   │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                  RuleStore::matching_swaps()
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   ReconciliationEngine                           │
//! │  "Actor holds the sword drawn: grant 0x0300, strip the rest"     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod definitions;
mod store;

pub use config::{ConfigError, default_builtin_dir, default_custom_dir, load_file, load_rules};
pub use definitions::{AuraVariant, LightAura, RuleConfig, SettingsOverride, SwapRule};
pub use store::{RuleStore, SwapRuleSet};
