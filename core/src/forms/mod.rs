//! Engine form data model
//!
//! Spells, magic effects, lights and weapons as the reconciliation core sees
//! them. The host engine owns the real objects; these are identity-keyed
//! views resolved through a [`FormLookup`].

mod table;

use lumen_types::{FormId, LightColor};
use serde::Deserialize;

pub use table::{FormTable, FormTableConfig};

/// Effect family of a base magic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    #[default]
    ValueModifier,
    Script,
    Cloak,
    Summon,
    Light,
    /// Any archetype the core has no special handling for
    #[serde(other)]
    Other,
}

/// Base effect definition referenced by a spell's effect entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectSetting {
    pub id: FormId,

    #[serde(default)]
    pub archetype: Archetype,

    /// Form the effect works with; a light form for `Archetype::Light`
    pub associated_form: Option<FormId>,
}

impl EffectSetting {
    pub fn is_light(&self) -> bool {
        self.archetype == Archetype::Light
    }
}

/// One entry in a spell's effect list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Effect {
    /// Base effect; may fail to resolve in a broken load order
    pub base_effect: Option<FormId>,
}

/// A spell or enchantment (both are magic items with an ordered effect list).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpellItem {
    pub id: FormId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub effects: Vec<Effect>,
}

/// A light form and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LightForm {
    pub id: FormId,

    #[serde(default)]
    pub color: LightColor,
}

/// An equipped weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Weapon {
    pub id: FormId,

    /// Enchantment carried by the weapon form itself
    pub enchantment: Option<FormId>,

    /// Bound (summoned) weapons never receive abilities
    #[serde(default)]
    pub bound: bool,
}

impl Weapon {
    pub fn new(id: FormId) -> Self {
        Self {
            id,
            enchantment: None,
            bound: false,
        }
    }

    pub fn with_enchantment(mut self, enchantment: FormId) -> Self {
        self.enchantment = Some(enchantment);
        self
    }

    pub fn bound(mut self) -> Self {
        self.bound = true;
        self
    }
}

/// Read-only access to engine forms by identity.
///
/// Every lookup may miss; callers treat a miss as "not applicable".
pub trait FormLookup {
    fn spell(&self, id: FormId) -> Option<&SpellItem>;

    fn effect_setting(&self, id: FormId) -> Option<&EffectSetting>;

    /// Resolve a form as a light. Returns `None` when the form is missing
    /// or is not a light.
    fn light(&self, id: FormId) -> Option<&LightForm>;
}
