use crate::Effect;

/// Everything the run loop processes: externally dispatched actions and the
/// effects that reductions hand back.
pub(crate) enum StoreEvent<Action: Send + 'static> {
    Action(Action),
    Effect(Effect<Action>),
}
