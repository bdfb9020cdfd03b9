//! Seams to the host engine
//!
//! The core never owns engine objects. It sees an actor through [`Actor`]
//! and everything else (pause state, form data, the shared light form)
//! through [`Host`].

mod snapshot;

use lumen_types::{FormId, Hand, LightColor};

use crate::forms::{FormLookup, Weapon};

pub use snapshot::{ActorState, SnapshotHost, SpellChange};

/// A live actor whose spell list the core reconciles.
pub trait Actor {
    /// Name used in log output
    fn display_name(&self) -> &str;

    fn is_weapon_drawn(&self) -> bool;

    /// Weapon in the given hand, if the equipped object is a weapon
    fn equipped_weapon(&self, hand: Hand) -> Option<Weapon>;

    /// Enchantment on the inventory entry equipped in the given hand
    /// (player-enchanted or otherwise dynamically applied)
    fn equipped_entry_enchantment(&self, hand: Hand) -> Option<FormId>;

    fn has_spell(&self, spell: FormId) -> bool;

    fn add_spell(&mut self, spell: FormId);

    fn remove_spell(&mut self, spell: FormId);
}

/// Process-level engine services.
pub trait Host: FormLookup {
    /// Checked on every reconciliation, never cached
    fn is_paused(&self) -> bool;

    /// Overwrite the color of a light form shared by every actor
    fn set_light_color(&mut self, light: FormId, color: LightColor);
}
