//! Swap rule and light aura definition types

use lumen_types::{EngineSettings, FormId, Hand};
use serde::Deserialize;

use crate::forms::Weapon;

/// One rule file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    /// Global switches; fields left out keep their previous value
    #[serde(default)]
    pub settings: Option<SettingsOverride>,

    /// Light aura forms; fields left out keep their previous value
    #[serde(default)]
    pub light: Option<LightAura>,

    #[serde(default, rename = "swap")]
    pub swaps: Vec<SwapRule>,
}

/// Partial [`EngineSettings`] as written in a rule file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsOverride {
    pub add_light: Option<bool>,
    pub require_weapon_drawn: Option<bool>,
}

impl SettingsOverride {
    pub fn apply(&self, settings: &mut EngineSettings) {
        if let Some(add_light) = self.add_light {
            settings.add_light = add_light;
        }
        if let Some(drawn) = self.require_weapon_drawn {
            settings.require_weapon_drawn = drawn;
        }
    }
}

/// Mapping from an enchanted weapon to the ability spell it grants per hand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapRule {
    /// Unique identifier for this rule (e.g., "flame_sword")
    pub id: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    // ─── Matching ───────────────────────────────────────────────────────────
    /// Enchantments that trigger this rule
    pub enchantments: Vec<FormId>,

    /// Weapons this rule is limited to (empty = any weapon)
    #[serde(default)]
    pub weapons: Vec<FormId>,

    // ─── Grants ─────────────────────────────────────────────────────────────
    /// Ability granted while the weapon is in the right hand
    pub right_ability: Option<FormId>,

    /// Ability granted while the weapon is in the left hand
    pub left_ability: Option<FormId>,
}

impl SwapRule {
    pub fn ability(&self, hand: Hand) -> Option<FormId> {
        match hand {
            Hand::Left => self.left_ability,
            Hand::Right => self.right_ability,
        }
    }

    /// Both abilities, skipping unset ones
    pub fn abilities(&self) -> impl Iterator<Item = FormId> + '_ {
        self.right_ability.into_iter().chain(self.left_ability)
    }

    pub fn matches(&self, weapon: &Weapon, enchantment: FormId) -> bool {
        self.enabled
            && self.enchantments.contains(&enchantment)
            && (self.weapons.is_empty() || self.weapons.contains(&weapon.id))
    }
}

/// Which light aura variant is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuraVariant {
    Right,
    Left,
    Both,
}

/// Light aura forms: the shared light and up to three spell variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LightAura {
    /// Light form whose color is rewritten before an aura is granted
    pub light_form: Option<FormId>,

    pub right: Option<FormId>,
    pub left: Option<FormId>,
    pub both: Option<FormId>,
}

impl LightAura {
    pub fn variant(&self, variant: AuraVariant) -> Option<FormId> {
        match variant {
            AuraVariant::Right => self.right,
            AuraVariant::Left => self.left,
            AuraVariant::Both => self.both,
        }
    }

    /// Configured variant spells, in strip order (right, left, both)
    pub fn variants(&self) -> impl Iterator<Item = FormId> {
        [self.right, self.left, self.both].into_iter().flatten()
    }

    /// Pick the variant for the given hand occupancy.
    ///
    /// Prefers "both", then "left", then "right", each only when its hand
    /// condition holds and the variant is configured.
    pub fn select(&self, left_present: bool, right_present: bool) -> Option<(AuraVariant, FormId)> {
        let candidates = [
            (AuraVariant::Both, left_present && right_present),
            (AuraVariant::Left, left_present),
            (AuraVariant::Right, right_present),
        ];
        candidates
            .into_iter()
            .filter(|(_, applies)| *applies)
            .find_map(|(variant, _)| self.variant(variant).map(|spell| (variant, spell)))
    }

    /// Overlay the fields set in `other`
    pub fn merge(&mut self, other: &LightAura) {
        self.light_form = other.light_form.or(self.light_form);
        self.right = other.right.or(self.right);
        self.left = other.left.or(self.left);
        self.both = other.both.or(self.both);
    }
}

fn default_true() -> bool {
    true
}
