//! Tests for the reconciliation engine
//!
//! Covers ability selection per hand, stale spell removal, and light aura
//! variant selection and coloring.

use lumen_types::{EngineSettings, FormId, LightColor};

use super::engine::{ReconcileOutcome, ReconcileReport, ReconciliationEngine, SkipReason};
use crate::actor::{Actor, ActorState, SnapshotHost, SpellChange};
use crate::forms::{Archetype, Effect, EffectSetting, FormTable, LightForm, SpellItem, Weapon};
use crate::rules::{AuraVariant, LightAura, RuleStore, SwapRule, SwapRuleSet};

const FLAME: FormId = FormId(0x100);
const FROST: FormId = FormId(0x101);
const SHOCK: FormId = FormId(0x102);

const SWORD: FormId = FormId(0x200);
const DAGGER: FormId = FormId(0x201);

const FLAME_RIGHT: FormId = FormId(0x300);
const FLAME_LEFT: FormId = FormId(0x301);
const FROST_RIGHT: FormId = FormId(0x302);
const FROST_LEFT: FormId = FormId(0x303);
const SHOCK_ANY: FormId = FormId(0x304);

const LIGHT_FORM: FormId = FormId(0x800);
const AURA_RIGHT: FormId = FormId(0x801);
const AURA_LEFT: FormId = FormId(0x802);
const AURA_BOTH: FormId = FormId(0x803);

const UNRELATED: FormId = FormId(0x999);

fn swap(id: &str, enchantment: FormId, right: Option<FormId>, left: Option<FormId>) -> SwapRule {
    SwapRule {
        id: id.to_string(),
        enabled: true,
        enchantments: vec![enchantment],
        weapons: vec![],
        right_ability: right,
        left_ability: left,
    }
}

fn full_aura() -> LightAura {
    LightAura {
        light_form: Some(LIGHT_FORM),
        right: Some(AURA_RIGHT),
        left: Some(AURA_LEFT),
        both: Some(AURA_BOTH),
    }
}

fn settings(add_light: bool) -> EngineSettings {
    EngineSettings {
        add_light,
        require_weapon_drawn: true,
    }
}

fn make_engine(settings: EngineSettings, light: LightAura) -> ReconciliationEngine<SwapRuleSet> {
    let mut rules = SwapRuleSet::new().with_settings(settings).with_light(light);
    rules.add_rules(
        vec![
            swap("flame", FLAME, Some(FLAME_RIGHT), Some(FLAME_LEFT)),
            swap("frost", FROST, Some(FROST_RIGHT), Some(FROST_LEFT)),
            swap("shock", SHOCK, Some(SHOCK_ANY), Some(SHOCK_ANY)),
        ],
        true,
    );
    ReconciliationEngine::new(rules)
}

/// Spell with a single light effect of the given color
fn lit_spell(forms: &mut FormTable, spell: FormId, color: LightColor) -> SpellItem {
    let effect_id = FormId(spell.0 + 0x1000);
    let light_id = FormId(spell.0 + 0x2000);
    forms.insert_effect(EffectSetting {
        id: effect_id,
        archetype: Archetype::Light,
        associated_form: Some(light_id),
    });
    forms.insert_light(LightForm {
        id: light_id,
        color,
    });
    SpellItem {
        id: spell,
        name: String::new(),
        effects: vec![Effect {
            base_effect: Some(effect_id),
        }],
    }
}

fn make_host() -> SnapshotHost {
    let mut forms = FormTable::new();
    let flame_right = lit_spell(&mut forms, FLAME_RIGHT, LightColor::new(200, 255, 255));
    let flame_left = lit_spell(&mut forms, FLAME_LEFT, LightColor::new(255, 120, 255));
    forms.insert_spell(flame_right);
    forms.insert_spell(flame_left);
    // Frost abilities carry no light effects
    forms.insert_spell(SpellItem {
        id: FROST_RIGHT,
        name: String::new(),
        effects: vec![],
    });
    forms.insert_light(LightForm {
        id: LIGHT_FORM,
        color: LightColor::WHITE,
    });
    SnapshotHost::new(forms)
}

fn sword(enchantment: FormId) -> Weapon {
    Weapon::new(SWORD).with_enchantment(enchantment)
}

fn dagger(enchantment: FormId) -> Weapon {
    Weapon::new(DAGGER).with_enchantment(enchantment)
}

fn run(
    engine: &ReconciliationEngine<SwapRuleSet>,
    host: &mut SnapshotHost,
    actor: &mut ActorState,
) -> ReconcileReport {
    let left = actor.left;
    let right = actor.right;
    match engine.reconcile(host, Some(actor), left.as_ref(), right.as_ref()) {
        ReconcileOutcome::Applied(report) => report,
        ReconcileOutcome::Skipped(reason) => panic!("unexpected skip: {reason:?}"),
    }
}

fn spells(actor: &ActorState) -> Vec<FormId> {
    actor.spells.iter().copied().collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Guards
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_no_actor_is_a_no_op() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let right = sword(FLAME);

    let outcome = engine.reconcile::<ActorState, _>(&mut host, None, None, Some(&right));
    assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::NoActor));
    assert!(host.light_writes().is_empty());
}

#[test]
fn test_paused_game_leaves_actor_untouched() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    host.paused = true;
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.spells.insert(FROST_RIGHT);

    let right = actor.right;
    let outcome = engine.reconcile(&mut host, Some(&mut actor), None, right.as_ref());

    assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::Paused));
    assert_eq!(spells(&actor), vec![FROST_RIGHT]);
    assert!(actor.changes().is_empty());
}

#[test]
fn test_pause_is_checked_on_every_call() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));

    host.paused = true;
    let right = actor.right;
    assert!(engine.reconcile(&mut host, Some(&mut actor), None, right.as_ref()).report().is_none());

    host.paused = false;
    run(&engine, &mut host, &mut actor);
    assert_eq!(spells(&actor), vec![FLAME_RIGHT]);
}

#[test]
fn test_sheathed_weapon_grants_nothing_and_strips_abilities() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia");
    actor.right = Some(sword(FLAME));
    actor.spells.insert(FLAME_RIGHT);
    actor.spells.insert(AURA_RIGHT);

    let report = run(&engine, &mut host, &mut actor);

    assert!(report.abilities.is_empty());
    assert!(report.aura.is_none());
    assert!(spells(&actor).is_empty());
}

#[test]
fn test_drawn_gate_can_be_disabled() {
    let engine = make_engine(
        EngineSettings {
            add_light: false,
            require_weapon_drawn: false,
        },
        full_aura(),
    );
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia");
    actor.right = Some(sword(FLAME));

    run(&engine, &mut host, &mut actor);
    assert_eq!(spells(&actor), vec![FLAME_RIGHT]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Ability selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_right_weapon_with_light_grants_ability_and_right_aura() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));

    let report = run(&engine, &mut host, &mut actor);

    assert_eq!(report.abilities, vec![FLAME_RIGHT]);
    assert_eq!(report.color, LightColor::new(200, 255, 255));
    let aura = report.aura.unwrap();
    assert_eq!(aura.variant, AuraVariant::Right);
    assert_eq!(aura.spell, AURA_RIGHT);
    assert_eq!(spells(&actor), vec![FLAME_RIGHT, AURA_RIGHT]);
    assert!(!actor.has_spell(AURA_LEFT));
    assert!(!actor.has_spell(AURA_BOTH));
    assert_eq!(
        host.light_writes(),
        &[(LIGHT_FORM, LightColor::new(200, 255, 255))]
    );
}

#[test]
fn test_reconcile_is_idempotent() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FROST));

    run(&engine, &mut host, &mut actor);
    let first = spells(&actor);
    let second_report = run(&engine, &mut host, &mut actor);

    assert_eq!(spells(&actor), first);
    assert_eq!(first, vec![FLAME_RIGHT, FROST_LEFT, AURA_BOTH]);
    assert_eq!(second_report.aura.map(|a| a.variant), Some(AuraVariant::Both));

    // Spells that stay are still stripped and re-granted each pass
    assert_eq!(second_report.removed, vec![FLAME_RIGHT, FROST_LEFT, AURA_BOTH]);
    assert_eq!(second_report.granted, vec![FLAME_RIGHT, FROST_LEFT, AURA_BOTH]);
}

#[test]
fn test_stale_abilities_are_removed_after_equipment_change() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FROST));
    run(&engine, &mut host, &mut actor);
    assert_eq!(spells(&actor), vec![FROST_RIGHT]);

    actor.right = Some(sword(FLAME));
    actor.clear_changes();
    run(&engine, &mut host, &mut actor);

    assert_eq!(spells(&actor), vec![FLAME_RIGHT]);
    assert_eq!(
        actor.changes(),
        &[SpellChange::Removed(FROST_RIGHT), SpellChange::Added(FLAME_RIGHT)]
    );
}

#[test]
fn test_unrelated_spells_are_kept() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.spells.insert(UNRELATED);

    run(&engine, &mut host, &mut actor);
    assert_eq!(spells(&actor), vec![UNRELATED]);
}

#[test]
fn test_bound_weapon_gets_no_ability() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME).bound());
    actor.left = Some(dagger(FROST));

    let report = run(&engine, &mut host, &mut actor);
    assert_eq!(report.abilities, vec![FROST_LEFT]);
}

#[test]
fn test_entry_enchantment_is_used_when_weapon_has_none() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(Weapon::new(SWORD));
    actor.right_entry_enchantment = Some(FROST);
    // The weapon's own enchantment wins over the entry's
    actor.left = Some(dagger(FLAME));
    actor.left_entry_enchantment = Some(FROST);

    let report = run(&engine, &mut host, &mut actor);
    assert_eq!(report.abilities, vec![FROST_RIGHT, FLAME_LEFT]);
}

#[test]
fn test_missing_enchantment_does_not_stop_other_hand() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(Weapon::new(SWORD));
    actor.left = Some(dagger(FLAME));

    let report = run(&engine, &mut host, &mut actor);
    assert_eq!(report.abilities, vec![FLAME_LEFT]);
}

#[test]
fn test_same_ability_from_both_hands_is_granted_once() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(SHOCK));
    actor.left = Some(dagger(SHOCK));

    let report = run(&engine, &mut host, &mut actor);
    assert_eq!(report.abilities, vec![SHOCK_ANY]);
    assert_eq!(report.granted, vec![SHOCK_ANY]);
    assert_eq!(
        actor.changes().iter().filter(|c| **c == SpellChange::Added(SHOCK_ANY)).count(),
        1
    );
}

#[test]
fn test_weapon_filter_limits_rule() {
    let mut rules = SwapRuleSet::new().with_settings(settings(false));
    rules.add_rules(
        vec![SwapRule {
            weapons: vec![DAGGER],
            ..swap("dagger_only", FLAME, Some(FLAME_RIGHT), Some(FLAME_LEFT))
        }],
        true,
    );
    let engine = ReconciliationEngine::new(rules);
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FLAME));

    let report = run(&engine, &mut host, &mut actor);
    assert_eq!(report.abilities, vec![FLAME_LEFT]);
}

#[test]
fn test_unresolvable_ability_is_still_granted() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    // FROST_LEFT has no spell record in the form table
    actor.left = Some(dagger(FROST));

    let report = run(&engine, &mut host, &mut actor);
    assert_eq!(spells(&actor), vec![FROST_LEFT]);
    assert_eq!(report.color, LightColor::WHITE);
    assert!(report.aura.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Light aura
// ─────────────────────────────────────────────────────────────────────────────

/// Store that enables light through `should_add_light` alone
struct AlwaysLit(SwapRuleSet);

impl RuleStore for AlwaysLit {
    fn matching_swaps(&self, weapon: &Weapon, enchantment: Option<FormId>) -> Vec<&SwapRule> {
        self.0.matching_swaps(weapon, enchantment)
    }

    fn all_abilities(&self) -> &[FormId] {
        self.0.all_abilities()
    }

    fn settings(&self) -> EngineSettings {
        self.0.settings()
    }

    fn light_aura(&self) -> &LightAura {
        self.0.light_aura()
    }

    fn should_add_light(&self) -> bool {
        true
    }
}

#[test]
fn test_light_toggle_comes_from_should_add_light() {
    let mut rules = SwapRuleSet::new().with_settings(settings(false)).with_light(full_aura());
    rules.add_rules(vec![swap("flame", FLAME, Some(FLAME_RIGHT), Some(FLAME_LEFT))], true);
    let engine = ReconciliationEngine::new(AlwaysLit(rules));
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));

    let right = actor.right;
    let outcome = engine.reconcile(&mut host, Some(&mut actor), None, right.as_ref());

    let report = outcome.report().unwrap();
    assert_eq!(report.aura.map(|a| a.spell), Some(AURA_RIGHT));
    assert_eq!(host.light_writes().len(), 1);
}

#[test]
fn test_light_disabled_never_grants_aura_or_writes_color() {
    let engine = make_engine(settings(false), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FLAME));

    let report = run(&engine, &mut host, &mut actor);

    assert!(report.aura.is_none());
    assert_eq!(report.color, LightColor::WHITE);
    assert!(host.light_writes().is_empty());
    assert_eq!(spells(&actor), vec![FLAME_RIGHT, FLAME_LEFT]);
}

#[test]
fn test_both_hands_lit_grants_both_variant_with_min_color() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FLAME));

    let report = run(&engine, &mut host, &mut actor);

    let aura = report.aura.unwrap();
    assert_eq!(aura.variant, AuraVariant::Both);
    assert_eq!(aura.color, LightColor::new(200, 120, 255));
    assert_eq!(spells(&actor), vec![FLAME_RIGHT, FLAME_LEFT, AURA_BOTH]);
}

#[test]
fn test_both_hands_without_both_variant_falls_back_to_left() {
    let light = LightAura {
        both: None,
        ..full_aura()
    };
    let engine = make_engine(settings(true), light);
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FROST));

    let report = run(&engine, &mut host, &mut actor);

    assert_eq!(report.aura.map(|a| a.spell), Some(AURA_LEFT));
    assert!(!actor.has_spell(AURA_RIGHT));
}

#[test]
fn test_previous_both_aura_replaced_by_left() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FLAME));
    run(&engine, &mut host, &mut actor);
    assert!(actor.has_spell(AURA_BOTH));

    actor.right = None;
    let report = run(&engine, &mut host, &mut actor);

    assert_eq!(report.aura.map(|a| a.variant), Some(AuraVariant::Left));
    assert!(!actor.has_spell(AURA_BOTH));
    assert!(actor.has_spell(AURA_LEFT));
    assert_eq!(spells(&actor), vec![FLAME_LEFT, AURA_LEFT]);
}

#[test]
fn test_aura_removed_when_light_source_unequipped() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    run(&engine, &mut host, &mut actor);

    actor.right = Some(sword(FROST));
    let report = run(&engine, &mut host, &mut actor);

    assert!(report.aura.is_none());
    assert_eq!(spells(&actor), vec![FROST_RIGHT]);
    assert_eq!(host.light_writes().len(), 1);
}

#[test]
fn test_bound_weapon_still_counts_for_aura_placement() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));
    actor.left = Some(dagger(FLAME).bound());

    let report = run(&engine, &mut host, &mut actor);

    assert_eq!(report.abilities, vec![FLAME_RIGHT]);
    assert_eq!(report.color, LightColor::new(200, 255, 255));
    assert_eq!(report.aura.map(|a| a.variant), Some(AuraVariant::Both));
}

#[test]
fn test_missing_light_form_still_grants_variant() {
    let light = LightAura {
        light_form: None,
        ..full_aura()
    };
    let engine = make_engine(settings(true), light);
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));

    let report = run(&engine, &mut host, &mut actor);

    assert_eq!(report.aura.map(|a| a.spell), Some(AURA_RIGHT));
    assert!(host.light_writes().is_empty());
}

#[test]
fn test_no_variants_configured_grants_no_aura() {
    let light = LightAura {
        light_form: Some(LIGHT_FORM),
        ..LightAura::default()
    };
    let engine = make_engine(settings(true), light);
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.right = Some(sword(FLAME));

    let report = run(&engine, &mut host, &mut actor);

    assert!(report.aura.is_none());
    assert_eq!(spells(&actor), vec![FLAME_RIGHT]);
}

#[test]
fn test_no_weapons_grants_no_aura() {
    let engine = make_engine(settings(true), full_aura());
    let mut host = make_host();
    let mut actor = ActorState::new("Lydia").drawn();
    actor.spells.insert(AURA_RIGHT);

    let report = run(&engine, &mut host, &mut actor);

    assert!(report.aura.is_none());
    assert_eq!(report.removed, vec![AURA_RIGHT]);
    assert!(spells(&actor).is_empty());
}
