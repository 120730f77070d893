use std::sync::Arc;

use futures::lock::Mutex as AsyncMutex;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinSet;

use crate::action_sender::{ActionSender, AnyActionSender};
use crate::change_observer::ChangeObserver;
use crate::effect::{Effect, EffectValue};
use crate::reducer::Reducer;
use crate::store_event::StoreEvent;

type EventSender<T> = tokio::sync::mpsc::UnboundedSender<T>;
type EventReceiver<T> = tokio::sync::mpsc::UnboundedReceiver<T>;

pub(crate) struct EventSenderHolder<Action: Send + 'static> {
    event_sender: EventSender<StoreEvent<Action>>,
}

impl<Action: Send + 'static> EventSenderHolder<Action> {
    fn new(event_sender: EventSender<StoreEvent<Action>>) -> Self {
        Self { event_sender }
    }

    pub(crate) fn send_event(&self, event: StoreEvent<Action>) {
        // The receiver only disappears during teardown; late sends from
        // in-flight jobs are dropped, matching the no-op of an aborted loop.
        let _ = self.event_sender.send(event);
    }
}

impl<Action: Send> ActionSender for Arc<EventSenderHolder<Action>> {
    type SendableAction = Action;

    fn send(&self, action: Action) {
        self.send_event(StoreEvent::Action(action));
    }
}

/// Run loop behind a `Store`. All reductions happen on one task, so state
/// transitions are serialized regardless of how many loader jobs are in
/// flight.
pub(crate) struct StoreEngine<State, Action>
where
    Action: Send + 'static,
    State: PartialEq + Clone + Send + 'static,
{
    state: Arc<Mutex<State>>,
    reducer: Arc<dyn Reducer<State, Action> + Sync + Send + 'static>,
    event_sender: Arc<EventSenderHolder<Action>>,
    event_receiver: Arc<AsyncMutex<EventReceiver<StoreEvent<Action>>>>,
    changes: broadcast::Sender<()>,
}

impl<State, Action> StoreEngine<State, Action>
where
    Action: std::fmt::Debug + Send,
    State: PartialEq + Clone + Send + 'static,
{
    pub(crate) fn new(
        state: State,
        reducer: impl Reducer<State, Action> + Sync + Send + 'static,
    ) -> Self {
        let (event_sender, event_receiver) =
            tokio::sync::mpsc::unbounded_channel::<StoreEvent<Action>>();
        let (changes, _) = broadcast::channel(16);

        Self {
            state: Arc::new(Mutex::new(state)),
            reducer: Arc::new(reducer),
            event_sender: Arc::new(EventSenderHolder::new(event_sender)),
            event_receiver: Arc::new(AsyncMutex::new(event_receiver)),
            changes,
        }
    }

    pub(crate) fn state(&self) -> parking_lot::MutexGuard<'_, State> {
        self.state.lock()
    }

    pub(crate) fn send_event(&self, event: StoreEvent<Action>) {
        self.event_sender.send_event(event);
    }

    pub(crate) fn run_loop(&self) -> tokio::task::AbortHandle {
        let sender = self.event_sender.clone();
        let receiver = self.event_receiver.clone();
        let reducer = self.reducer.clone();
        let state = self.state.clone();
        let changes = self.changes.clone();

        let handle = tokio::spawn(async move {
            let mut event_receiver = receiver.lock().await;
            let mut join_set: JoinSet<()> = JoinSet::new();

            while let Some(event) = event_receiver.recv().await {
                match event {
                    StoreEvent::Action(action) => {
                        sender.send_event(StoreEvent::Effect(Effect::send(action)));
                    }
                    StoreEvent::Effect(effect) => {
                        log::debug!("handling {:?}", effect.value);
                        match effect.value {
                            EffectValue::None => {}
                            EffectValue::Send(action) => {
                                let next = {
                                    let mut state = state.lock();
                                    let before = state.clone();
                                    let next = reducer.reduce(&mut state, action);
                                    if before != *state {
                                        let _ = changes.send(());
                                    }
                                    next
                                };
                                sender.send_event(StoreEvent::Effect(next));
                            }
                            EffectValue::Async(job) => {
                                let any_sender = AnyActionSender::new(Box::new(sender.clone()));
                                join_set.spawn(job(any_sender));
                            }
                        }
                    }
                }
            }
        });

        handle.abort_handle()
    }
}

impl<State, Action> ActionSender for StoreEngine<State, Action>
where
    Action: Send,
    State: PartialEq + Clone + Send,
{
    type SendableAction = Action;

    fn send(&self, action: Action) {
        self.event_sender.send_event(StoreEvent::Action(action));
    }
}

impl<State, Action> ChangeObserver for StoreEngine<State, Action>
where
    Action: Send,
    State: PartialEq + Clone + Send,
{
    fn observe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}
