use std::collections::BTreeSet;

use lumen_types::{FormId, Hand, LightColor};
use serde::Deserialize;

use super::{Actor, Host};
use crate::forms::{EffectSetting, FormLookup, FormTable, LightForm, SpellItem, Weapon};

/// A spell list mutation applied to an [`ActorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellChange {
    Added(FormId),
    Removed(FormId),
}

/// Plain-data actor, used by the scenario simulator and in tests.
///
/// Records every spell mutation it receives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorState {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub weapon_drawn: bool,

    pub left: Option<Weapon>,
    pub right: Option<Weapon>,

    /// Equipped inventory entry enchantments, per hand
    pub left_entry_enchantment: Option<FormId>,
    pub right_entry_enchantment: Option<FormId>,

    #[serde(default)]
    pub spells: BTreeSet<FormId>,

    #[serde(skip)]
    changes: Vec<SpellChange>,
}

impl ActorState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn drawn(mut self) -> Self {
        self.weapon_drawn = true;
        self
    }

    pub fn changes(&self) -> &[SpellChange] {
        &self.changes
    }

    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

impl Actor for ActorState {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_weapon_drawn(&self) -> bool {
        self.weapon_drawn
    }

    fn equipped_weapon(&self, hand: Hand) -> Option<Weapon> {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }

    fn equipped_entry_enchantment(&self, hand: Hand) -> Option<FormId> {
        match hand {
            Hand::Left => self.left_entry_enchantment,
            Hand::Right => self.right_entry_enchantment,
        }
    }

    fn has_spell(&self, spell: FormId) -> bool {
        self.spells.contains(&spell)
    }

    fn add_spell(&mut self, spell: FormId) {
        if self.spells.insert(spell) {
            self.changes.push(SpellChange::Added(spell));
        }
    }

    fn remove_spell(&mut self, spell: FormId) {
        if self.spells.remove(&spell) {
            self.changes.push(SpellChange::Removed(spell));
        }
    }
}

/// [`Host`] backed by a [`FormTable`].
///
/// Light color writes land in the table and are also counted.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHost {
    pub forms: FormTable,
    pub paused: bool,
    light_writes: Vec<(FormId, LightColor)>,
}

impl SnapshotHost {
    pub fn new(forms: FormTable) -> Self {
        Self {
            forms,
            paused: false,
            light_writes: Vec::new(),
        }
    }

    pub fn light_writes(&self) -> &[(FormId, LightColor)] {
        &self.light_writes
    }
}

impl FormLookup for SnapshotHost {
    fn spell(&self, id: FormId) -> Option<&SpellItem> {
        self.forms.spell(id)
    }

    fn effect_setting(&self, id: FormId) -> Option<&EffectSetting> {
        self.forms.effect_setting(id)
    }

    fn light(&self, id: FormId) -> Option<&LightForm> {
        self.forms.light(id)
    }
}

impl Host for SnapshotHost {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_light_color(&mut self, light: FormId, color: LightColor) {
        self.light_writes.push((light, color));
        match self.forms.light_mut(light) {
            Some(form) => form.color = color,
            None => self.forms.insert_light(LightForm { id: light, color }),
        }
    }
}
