use hashbrown::HashSet;
use lumen_types::{FormId, Hand, LightColor};

use crate::actor::{Actor, Host};
use crate::forms::Weapon;
use crate::light::accumulate_light;
use crate::rules::{AuraVariant, RuleStore};

/// Why a reconciliation pass did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoActor,
    Paused,
}

/// The aura granted at the end of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuraGrant {
    pub variant: AuraVariant,
    pub spell: FormId,
    pub color: LightColor,
}

/// What a completed pass did to the actor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Abilities the actor should hold, in discovery order (right hand first)
    pub abilities: Vec<FormId>,
    /// Spells removed, ability registry first, then aura variants
    pub removed: Vec<FormId>,
    /// Spells added, abilities first, then the aura
    pub granted: Vec<FormId>,
    /// Accumulated light color (white when nothing contributed)
    pub color: LightColor,
    pub aura: Option<AuraGrant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Skipped(SkipReason),
    Applied(ReconcileReport),
}

impl ReconcileOutcome {
    pub fn report(&self) -> Option<&ReconcileReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }
}

/// Ordered, identity-unique list of abilities collected during a pass
#[derive(Debug, Default)]
struct AbilitySet {
    order: Vec<FormId>,
    seen: HashSet<FormId>,
}

impl AbilitySet {
    fn insert(&mut self, spell: FormId) -> bool {
        if self.seen.insert(spell) {
            self.order.push(spell);
            true
        } else {
            false
        }
    }

    fn contains(&self, spell: FormId) -> bool {
        self.seen.contains(&spell)
    }
}

/// Reconciles an actor's ability spells against its equipped weapons.
///
/// Every pass strips all known abilities and light aura variants, then grants
/// the freshly computed set, so repeated passes over unchanged state converge
/// on the same spell list.
#[derive(Debug)]
pub struct ReconciliationEngine<S> {
    store: S,
}

impl<S: RuleStore> ReconciliationEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run one pass for `actor` holding `left` and `right`.
    ///
    /// Never fails: unresolvable references along the way only disable the
    /// part of the pass that needed them.
    ///
    /// Every known ability the actor holds is removed before the computed
    /// set is granted, so an ability that stays appears in both `removed`
    /// and `granted`. Repeated passes over unchanged state always end on the
    /// same spell list; the change log itself is not empty.
    pub fn reconcile<A, H>(
        &self,
        host: &mut H,
        actor: Option<&mut A>,
        left: Option<&Weapon>,
        right: Option<&Weapon>,
    ) -> ReconcileOutcome
    where
        A: Actor + ?Sized,
        H: Host + ?Sized,
    {
        let Some(actor) = actor else {
            tracing::trace!("Skipping reconciliation: no actor");
            return ReconcileOutcome::Skipped(SkipReason::NoActor);
        };
        if host.is_paused() {
            tracing::trace!(actor = %actor.display_name(), "Skipping reconciliation: game paused");
            return ReconcileOutcome::Skipped(SkipReason::Paused);
        }

        let settings = self.store.settings();
        let add_light = self.store.should_add_light();
        let drawn = actor.is_weapon_drawn();
        tracing::debug!(actor = %actor.display_name(), drawn, "Reconciling abilities");

        let mut abilities = AbilitySet::default();
        let mut color = LightColor::WHITE;

        if drawn || !settings.require_weapon_drawn {
            for hand in Hand::ORDER {
                let weapon = match hand {
                    Hand::Right => right,
                    Hand::Left => left,
                };
                let Some(weapon) = weapon.filter(|w| !w.bound) else {
                    continue;
                };
                self.collect_hand(host, &*actor, hand, weapon, add_light, &mut abilities, &mut color);
            }
        }

        let mut report = ReconcileReport {
            color,
            ..ReconcileReport::default()
        };

        for &spell in self.store.all_abilities() {
            if actor.has_spell(spell) {
                actor.remove_spell(spell);
                report.removed.push(spell);
            }
        }

        for &spell in &abilities.order {
            if !actor.has_spell(spell) {
                actor.add_spell(spell);
                report.granted.push(spell);
            }
        }

        let light = *self.store.light_aura();
        for spell in light.variants() {
            if actor.has_spell(spell) {
                actor.remove_spell(spell);
                report.removed.push(spell);
            }
        }

        if add_light && color.is_dimmed() {
            report.aura = self.grant_aura(host, actor, left.is_some(), right.is_some(), color);
            if let Some(aura) = &report.aura {
                report.granted.push(aura.spell);
            }
        }

        report.abilities = abilities.order;
        tracing::debug!(
            actor = %actor.display_name(),
            granted = report.granted.len(),
            removed = report.removed.len(),
            aura = ?report.aura.map(|a| a.variant),
            "Reconciled abilities"
        );
        ReconcileOutcome::Applied(report)
    }

    /// Collect the abilities one hand contributes, folding light colors of
    /// newly seen spells when `add_light` is set.
    fn collect_hand<A, H>(
        &self,
        host: &H,
        actor: &A,
        hand: Hand,
        weapon: &Weapon,
        add_light: bool,
        abilities: &mut AbilitySet,
        color: &mut LightColor,
    ) where
        A: Actor + ?Sized,
        H: Host + ?Sized,
    {
        let enchantment = weapon
            .enchantment
            .or_else(|| actor.equipped_entry_enchantment(hand));

        for swap in self.store.matching_swaps(weapon, enchantment) {
            let Some(spell) = swap.ability(hand) else {
                continue;
            };
            if abilities.contains(spell) {
                continue;
            }
            if add_light {
                match host.spell(spell) {
                    Some(item) => *color = accumulate_light(item, host, *color),
                    None => tracing::trace!(%spell, "Ability spell not resolvable, no light contribution"),
                }
            }
            tracing::trace!(%hand, rule = %swap.id, %spell, "Ability selected");
            abilities.insert(spell);
        }
    }

    /// Write the accumulated color to the shared light form and grant the
    /// variant matching hand occupancy.
    ///
    /// The write and the grant happen under the same exclusive borrow of the
    /// host, so no other pass can change the color in between.
    fn grant_aura<A, H>(
        &self,
        host: &mut H,
        actor: &mut A,
        left_present: bool,
        right_present: bool,
        color: LightColor,
    ) -> Option<AuraGrant>
    where
        A: Actor + ?Sized,
        H: Host + ?Sized,
    {
        let light = self.store.light_aura();
        match light.light_form {
            Some(form) => host.set_light_color(form, color),
            None => tracing::warn!(%color, "No light form configured, aura keeps its stock color"),
        }

        let (variant, spell) = light.select(left_present, right_present)?;

        if !actor.has_spell(spell) {
            actor.add_spell(spell);
        }
        Some(AuraGrant {
            variant,
            spell,
            color,
        })
    }
}
