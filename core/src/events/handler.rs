use lumen_types::Hand;

use super::EngineSignal;
use crate::actor::{Actor, Host};
use crate::reconcile::ReconciliationEngine;
use crate::rules::RuleStore;

/// Receives intercepted engine calls.
pub trait SignalHandler<A: Actor + ?Sized, H: Host + ?Sized> {
    fn handle_signal(&mut self, signal: &EngineSignal, actor: Option<&mut A>, host: &mut H);
}

impl<S, A, H> SignalHandler<A, H> for ReconciliationEngine<S>
where
    S: RuleStore,
    A: Actor + ?Sized,
    H: Host + ?Sized,
{
    fn handle_signal(&mut self, signal: &EngineSignal, actor: Option<&mut A>, host: &mut H) {
        let Some(actor) = actor else {
            return;
        };
        // Only weapons count; spells or shields in a hand leave it empty
        let left = actor.equipped_weapon(Hand::Left);
        let right = actor.equipped_weapon(Hand::Right);
        tracing::trace!(signal = signal.name(), actor = %actor.display_name(), "Handling engine signal");
        self.reconcile(host, Some(actor), left.as_ref(), right.as_ref());
    }
}
