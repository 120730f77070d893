use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::AbortHandle;

use crate::action_sender::ActionSender;
use crate::change_observer::ChangeObserver;
use crate::effect::Effect;
use crate::engine::StoreEngine;
use crate::reducer::Reducer;
use crate::store_event::StoreEvent;

/// Owns one view-model and the run loop that folds notifications into it.
/// Dropping the store aborts the loop; in-flight loader jobs are dropped
/// with it.
pub struct Store<State, Action>
where
    Action: std::fmt::Debug + Send + 'static,
    State: PartialEq + Clone + Send + 'static,
{
    engine: Arc<StoreEngine<State, Action>>,
    handle: AbortHandle,
}

impl<State, Action> Store<State, Action>
where
    Action: std::fmt::Debug + Send + 'static,
    State: PartialEq + Clone + Send + 'static,
{
    pub fn new<R: Reducer<State, Action> + Sync + Send + 'static>(
        state: State,
        reducer: R,
    ) -> Self {
        let engine = StoreEngine::new(state, reducer);
        let handle = engine.run_loop();
        Self {
            engine: Arc::new(engine),
            handle,
        }
    }

    pub fn state(&self) -> parking_lot::MutexGuard<'_, State> {
        self.engine.state()
    }

    /// Feeds a loader effect into the run loop. The notifications it emits
    /// come back through the reducer in dispatch order.
    pub fn run(&self, effect: Effect<Action>) {
        self.engine.send_event(StoreEvent::Effect(effect));
    }
}

impl<State, Action> ActionSender for Store<State, Action>
where
    Action: std::fmt::Debug + Send + 'static,
    State: PartialEq + Clone + Send + 'static,
{
    type SendableAction = Action;

    fn send(&self, action: Action) {
        self.engine.send(action);
    }
}

impl<State, Action> ChangeObserver for Store<State, Action>
where
    Action: std::fmt::Debug + Send + 'static,
    State: PartialEq + Clone + Send + 'static,
{
    fn observe(&self) -> broadcast::Receiver<()> {
        self.engine.observe()
    }
}

impl<State, Action> Drop for Store<State, Action>
where
    Action: std::fmt::Debug + Send + 'static,
    State: PartialEq + Clone + Send + 'static,
{
    fn drop(&mut self) {
        self.handle.abort();
    }
}
