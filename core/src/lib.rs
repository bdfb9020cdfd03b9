pub mod actor;
pub mod events;
pub mod forms;
pub mod light;
pub mod reconcile;
pub mod rules;

// Re-exports for convenience
pub use actor::{Actor, ActorState, Host, SnapshotHost};
pub use events::{EngineSignal, EventAdapter, SignalHandler};
pub use forms::{FormLookup, FormTable, Weapon};
pub use light::accumulate_light;
pub use reconcile::{ReconcileOutcome, ReconcileReport, ReconciliationEngine, SkipReason};
pub use rules::{RuleStore, SwapRule, SwapRuleSet};
pub use lumen_types::*;
