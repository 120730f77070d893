use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use crate::action_mapper::ActionMapper;
use crate::action_sender::AnyActionSender;

/// An async job that may dispatch any number of follow-up actions through
/// the sender it is handed.
pub type EffectJob<Action> =
    Box<dyn FnOnce(AnyActionSender<Action>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Work a reducer or loader hands back to the store's run loop.
pub struct Effect<Action: Send + 'static> {
    pub(crate) value: EffectValue<Action>,
}

pub(crate) enum EffectValue<Action: Send + 'static> {
    None,
    Send(Action),
    Async(EffectJob<Action>),
}

impl<Action> Effect<Action>
where
    Action: Send + 'static,
{
    pub fn none() -> Self {
        Self {
            value: EffectValue::None,
        }
    }

    pub fn send(action: Action) -> Self {
        Self {
            value: EffectValue::Send(action),
        }
    }

    pub fn run<J, Fut>(job: J) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
        J: FnOnce(AnyActionSender<Action>) -> Fut + Send + 'static,
    {
        let boxed: EffectJob<Action> = Box::new(move |sender| Box::pin(job(sender)));
        Self {
            value: EffectValue::Async(boxed),
        }
    }

    /// Lifts a child-domain effect into a parent action space.
    pub fn map<F, MappedAction>(self, map: F) -> Effect<MappedAction>
    where
        MappedAction: Send + 'static,
        F: Fn(Action) -> MappedAction + Send + Sync + 'static,
    {
        match self.value {
            EffectValue::None => Effect::none(),
            EffectValue::Send(action) => Effect::send(map(action)),
            EffectValue::Async(job) => Effect::run(|sender| async move {
                let mapper = ActionMapper::new(Box::new(sender), map);
                job(AnyActionSender::new(Box::new(mapper))).await
            }),
        }
    }
}

impl<Action: Send> Debug for EffectValue<Action>
where
    Action: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Send(action) => write!(f, "Send {:?}", action),
            Self::Async(_) => f.write_str("Async"),
        }
    }
}
