//! Rule store query interface and its indexed implementation

use std::collections::BTreeSet;

use hashbrown::HashMap;
use lumen_types::{EngineSettings, FormId};

use super::definitions::{LightAura, RuleConfig, SwapRule};
use crate::forms::Weapon;

/// Query interface the reconciliation engine consumes.
pub trait RuleStore {
    /// Enabled rules matching a weapon and its resolved enchantment, in a
    /// deterministic order. No enchantment never matches.
    fn matching_swaps(&self, weapon: &Weapon, enchantment: Option<FormId>) -> Vec<&SwapRule>;

    /// Every ability spell any rule can grant, enabled or not
    fn all_abilities(&self) -> &[FormId];

    fn settings(&self) -> EngineSettings;

    fn light_aura(&self) -> &LightAura;

    fn should_add_light(&self) -> bool {
        self.settings().add_light
    }
}

/// Combined set of swap rules with an enchantment index for fast lookup
#[derive(Debug, Clone, Default)]
pub struct SwapRuleSet {
    /// Rules in load order
    rules: Vec<SwapRule>,

    settings: EngineSettings,
    light: LightAura,

    // ─── Indexes ─────────────────────────────────────────────────────────────
    /// Rule ID -> position in `rules`
    id_index: HashMap<String, usize>,
    /// Enchantment -> positions in `rules`, ascending
    enchantment_index: HashMap<FormId, Vec<usize>>,
    /// Sorted, deduplicated abilities of all rules
    abilities: Vec<FormId>,
}

impl SwapRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_light(mut self, light: LightAura) -> Self {
        self.light = light;
        self
    }

    /// Add a rule file's contents. If `overwrite` is true, rules replace
    /// existing rules with the same ID in place.
    /// Returns IDs of duplicates that were encountered (skipped if !overwrite,
    /// replaced if overwrite). Rules granting nothing or listing no
    /// enchantment are dropped.
    pub fn add_config(&mut self, config: RuleConfig, overwrite: bool) -> Vec<String> {
        if let Some(settings) = &config.settings {
            settings.apply(&mut self.settings);
        }
        if let Some(light) = &config.light {
            self.light.merge(light);
        }
        self.add_rules(config.swaps, overwrite)
    }

    pub fn add_rules(&mut self, rules: Vec<SwapRule>, overwrite: bool) -> Vec<String> {
        let mut duplicates = Vec::new();
        for rule in rules {
            if rule.abilities().next().is_none() {
                tracing::warn!(rule = %rule.id, "Swap rule grants no ability, skipping");
                continue;
            }
            if rule.enchantments.is_empty() {
                tracing::warn!(rule = %rule.id, "Swap rule lists no enchantment, skipping");
                continue;
            }
            match self.id_index.get(&rule.id).copied() {
                Some(pos) => {
                    duplicates.push(rule.id.clone());
                    if overwrite {
                        self.rules[pos] = rule;
                    }
                }
                None => {
                    self.id_index.insert(rule.id.clone(), self.rules.len());
                    self.rules.push(rule);
                }
            }
        }
        self.rebuild_indexes();
        duplicates
    }

    fn rebuild_indexes(&mut self) {
        self.enchantment_index.clear();
        let mut abilities = BTreeSet::new();
        for (pos, rule) in self.rules.iter().enumerate() {
            for enchantment in &rule.enchantments {
                let entry = self.enchantment_index.entry(*enchantment).or_default();
                if entry.last() != Some(&pos) {
                    entry.push(pos);
                }
            }
            abilities.extend(rule.abilities());
        }
        self.abilities = abilities.into_iter().collect();
    }

    /// Get a rule by ID
    pub fn get(&self, id: &str) -> Option<&SwapRule> {
        self.id_index.get(id).map(|&pos| &self.rules[pos])
    }

    pub fn rules(&self) -> &[SwapRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleStore for SwapRuleSet {
    fn matching_swaps(&self, weapon: &Weapon, enchantment: Option<FormId>) -> Vec<&SwapRule> {
        let Some(enchantment) = enchantment else {
            return Vec::new();
        };
        let Some(positions) = self.enchantment_index.get(&enchantment) else {
            return Vec::new();
        };
        positions
            .iter()
            .map(|&pos| &self.rules[pos])
            .filter(|rule| rule.matches(weapon, enchantment))
            .collect()
    }

    fn all_abilities(&self) -> &[FormId] {
        &self.abilities
    }

    fn settings(&self) -> EngineSettings {
        self.settings
    }

    fn light_aura(&self) -> &LightAura {
        &self.light
    }
}
