mod action;
mod action_mapper;
mod action_sender;
mod change_observer;
mod debounce;
mod effect;
mod engine;
mod executor;
mod loader;
mod merge;
mod paged;
mod reducer;
mod sequencer;
mod store;
mod store_event;

pub mod comics;

pub use action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
pub use action_sender::{ActionSender, AnyActionSender};
pub use change_observer::ChangeObserver;
pub use debounce::{DebounceChannel, Debouncer, DEFAULT_QUIESCENCE};
pub use effect::Effect;
pub use executor::{decode, require_field, QueryContext, QueryError, QueryExecutor, QueryRequest};
pub use loader::{debounced_query, sequenced_query};
pub use merge::{merge_by_uuid, page_filled, Keyed};
pub use paged::{PagedPayload, PagedState};
pub use reducer::Reducer;
pub use sequencer::{RequestSequencer, SeqNo};
pub use store::Store;
