//! Scenario simulation
//!
//! A scenario file describes engine forms and one actor:
//!
//! ```toml
//! passes = 2
//!
//! [actor]
//! name = "Lydia"
//! weapon_drawn = true
//! right = { id = 0x0200, enchantment = 0x0100 }
//!
//! [[spell]]
//! id = 0x0300
//! effects = [{ base_effect = 0x0400 }]
//! ```

use std::path::Path;

use lumen_core::actor::SpellChange;
use lumen_core::forms::{FormTable, FormTableConfig, Weapon};
use lumen_core::rules::load_rules;
use lumen_core::{
    Actor, ActorState, EngineSignal, EventAdapter, Hand, ReconciliationEngine, SnapshotHost,
    SwapRuleSet,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default = "default_passes")]
    passes: u32,

    #[serde(default)]
    paused: bool,

    actor: ActorState,

    #[serde(flatten)]
    forms: FormTableConfig,
}

fn default_passes() -> u32 {
    1
}

/// Result of running every pass of a scenario
struct Simulation {
    actor: ActorState,
    host: SnapshotHost,
    passes: Vec<Vec<SpellChange>>,
}

fn describe(weapon: Option<Weapon>) -> String {
    match weapon {
        Some(w) if w.bound => format!("{} (bound)", w.id),
        Some(w) => match w.enchantment {
            Some(e) => format!("{} enchanted {}", w.id, e),
            None => w.id.to_string(),
        },
        None => "empty".to_string(),
    }
}

fn run(rules: SwapRuleSet, scenario: Scenario) -> Simulation {
    let mut host = SnapshotHost::new(FormTable::from_config(scenario.forms));
    host.paused = scenario.paused;
    let mut actor = scenario.actor;
    let mut adapter = EventAdapter::new(ReconciliationEngine::new(rules));

    let mut passes = Vec::new();
    for _ in 0..scenario.passes {
        actor.clear_changes();
        adapter.intercept(EngineSignal::ShaderEffectInitialized, Some(&mut actor), &mut host, || ());
        passes.push(actor.changes().to_vec());
    }

    Simulation {
        actor,
        host,
        passes,
    }
}

pub fn simulate(rules_dir: &Path, scenario_path: &Path) -> Result<(), String> {
    let rules = load_rules(Some(rules_dir), None).map_err(|e| e.to_string())?;
    let contents = std::fs::read_to_string(scenario_path)
        .map_err(|e| format!("Cannot read {}: {e}", scenario_path.display()))?;
    let scenario: Scenario = toml::from_str(&contents)
        .map_err(|e| format!("Parse error in {}: {e}", scenario_path.display()))?;

    let sim = run(rules, scenario);

    println!(
        "{} (left: {}, right: {}, drawn: {})",
        sim.actor.display_name(),
        describe(sim.actor.equipped_weapon(Hand::Left)),
        describe(sim.actor.equipped_weapon(Hand::Right)),
        sim.actor.is_weapon_drawn()
    );
    for (i, changes) in sim.passes.iter().enumerate() {
        println!("pass {}", i + 1);
        for change in changes {
            match change {
                SpellChange::Added(spell) => println!("  + {spell}"),
                SpellChange::Removed(spell) => println!("  - {spell}"),
            }
        }
    }

    println!("final spells:");
    for spell in &sim.actor.spells {
        println!("  {spell}");
    }
    for (light, color) in sim.host.light_writes() {
        println!("light {light} set to {color}");
    }
    Ok(())
}
