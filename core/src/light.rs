//! Light color accumulation
//!
//! Folds the colors of every light effect on a spell into a running
//! per-channel minimum. The fold is commutative and associative, so effect
//! order and spell order never change the result.

use lumen_types::LightColor;

use crate::forms::{FormLookup, SpellItem};

/// Fold the light effects of `spell` into `running`.
///
/// Effects with no base effect, a non-light archetype, or an associated
/// form that is not a light are skipped.
pub fn accumulate_light<F>(spell: &SpellItem, forms: &F, running: LightColor) -> LightColor
where
    F: FormLookup + ?Sized,
{
    spell
        .effects
        .iter()
        .filter_map(|effect| effect.base_effect)
        .filter_map(|id| forms.effect_setting(id))
        .filter(|base| base.is_light())
        .filter_map(|base| base.associated_form)
        .filter_map(|form| forms.light(form))
        .fold(running, |acc, light| {
            tracing::trace!(spell = %spell.id, light = %light.id, color = %light.color, "Folding light effect");
            acc.min(light.color)
        })
}
