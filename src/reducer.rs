use crate::Effect;

/// Pure state transition: folds one action into the state and returns any
/// follow-up work. Invoked serially by the store's run loop.
pub trait Reducer<State, Action: Send> {
    fn reduce(&self, state: &mut State, action: Action) -> Effect<Action>;
}
