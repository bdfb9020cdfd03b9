use hashbrown::HashMap;
use lumen_types::FormId;
use serde::Deserialize;

use super::{EffectSetting, FormLookup, LightForm, SpellItem};

/// TOML shape of a form table.
///
/// ```toml
/// [[spell]]
/// id = 0x0300
/// name = "Flame Cloak"
/// effects = [{ base_effect = 0x0400 }]
///
/// [[effect]]
/// id = 0x0400
/// archetype = "light"
/// associated_form = 0x0500
///
/// [[light]]
/// id = 0x0500
/// color = [200, 255, 255]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormTableConfig {
    #[serde(default, rename = "spell")]
    pub spells: Vec<SpellItem>,

    #[serde(default, rename = "effect")]
    pub effects: Vec<EffectSetting>,

    #[serde(default, rename = "light")]
    pub lights: Vec<LightForm>,
}

/// In-memory [`FormLookup`] keyed by form ID.
#[derive(Debug, Clone, Default)]
pub struct FormTable {
    spells: HashMap<FormId, SpellItem>,
    effects: HashMap<FormId, EffectSetting>,
    lights: HashMap<FormId, LightForm>,
}

impl FormTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: FormTableConfig) -> Self {
        let mut table = Self::new();
        for spell in config.spells {
            table.insert_spell(spell);
        }
        for effect in config.effects {
            table.insert_effect(effect);
        }
        for light in config.lights {
            table.insert_light(light);
        }
        table
    }

    pub fn insert_spell(&mut self, spell: SpellItem) {
        self.spells.insert(spell.id, spell);
    }

    pub fn insert_effect(&mut self, effect: EffectSetting) {
        self.effects.insert(effect.id, effect);
    }

    pub fn insert_light(&mut self, light: LightForm) {
        self.lights.insert(light.id, light);
    }

    /// Mutable access to a light, used when the host writes a new color
    pub fn light_mut(&mut self, id: FormId) -> Option<&mut LightForm> {
        self.lights.get_mut(&id)
    }
}

impl FormLookup for FormTable {
    fn spell(&self, id: FormId) -> Option<&SpellItem> {
        self.spells.get(&id)
    }

    fn effect_setting(&self, id: FormId) -> Option<&EffectSetting> {
        self.effects.get(&id)
    }

    fn light(&self, id: FormId) -> Option<&LightForm> {
        self.lights.get(&id)
    }
}
