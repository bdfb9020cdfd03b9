//! Bridge between intercepted engine calls and signal handlers
//!
//! The installed hooks call [`EventAdapter::intercept`] with the actor the
//! engine call concerns and a closure running the original function. The
//! handler runs first, then the original, whose return value is passed back
//! unchanged.

use super::{EngineSignal, SignalHandler};
use crate::actor::{Actor, Host};

#[derive(Debug)]
pub struct EventAdapter<T> {
    handler: T,
    dispatched: u64,
}

impl<T> EventAdapter<T> {
    pub fn new(handler: T) -> Self {
        Self {
            handler,
            dispatched: 0,
        }
    }

    /// Number of signals that reached the handler
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Run the handler for `signal`, then the original engine behavior.
    pub fn intercept<A, H, R>(
        &mut self,
        signal: EngineSignal,
        actor: Option<&mut A>,
        host: &mut H,
        original: impl FnOnce() -> R,
    ) -> R
    where
        A: Actor + ?Sized,
        H: Host + ?Sized,
        T: SignalHandler<A, H>,
    {
        if actor.is_some() {
            self.dispatched += 1;
            self.handler.handle_signal(&signal, actor, host);
        }
        original()
    }
}
