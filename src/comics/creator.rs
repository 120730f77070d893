use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{decode, require_field, QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::reducer::Reducer;
use crate::sequencer::SeqNo;

use super::types::{ComicSeries, Creator};

pub const GET_CREATOR: AsyncActionKinds = AsyncActionKinds::of(Domain::Creator);

const OPERATION: &str = "GetCreator";

#[derive(Debug, Clone)]
pub struct CreatorParams {
    pub uuid: String,
    pub force_refresh: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatorPayload {
    pub creator: Creator,
    /// The creator's comics with null entries dropped.
    pub comics: Vec<ComicSeries>,
}

pub type CreatorNotification = QueryNotification<CreatorPayload>;

pub fn load_creator(ctx: &QueryContext, params: CreatorParams) -> Effect<CreatorNotification> {
    let request = QueryRequest::new(OPERATION, json!({ "uuid": params.uuid }))
        .bypass_cache(params.force_refresh);
    sequenced_query(ctx, GET_CREATOR, request, QueryPage::first(), parse_creator)
}

pub fn parse_creator(data: Value) -> Result<CreatorPayload, QueryError> {
    let creator: Creator = decode(OPERATION, require_field(&data, OPERATION, "getCreator")?)?;
    let comics = creator
        .comics
        .clone()
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect();
    Ok(CreatorPayload { creator, comics })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatorState {
    pub is_loading: bool,
    pub creator: Option<Creator>,
    pub comics: Vec<ComicSeries>,
    pub last_seq: SeqNo,
}

#[derive(Default)]
pub struct CreatorReducer;

impl Reducer<CreatorState, CreatorNotification> for CreatorReducer {
    fn reduce(
        &self,
        state: &mut CreatorState,
        notification: CreatorNotification,
    ) -> Effect<CreatorNotification> {
        if notification.seq() < state.last_seq {
            return Effect::none();
        }
        match notification {
            QueryNotification::Requested { seq, .. } => {
                state.is_loading = true;
                state.last_seq = seq;
            }
            QueryNotification::Succeeded { payload, seq, .. } => {
                state.is_loading = false;
                state.creator = Some(payload.creator);
                state.comics = payload.comics;
                state.last_seq = seq;
            }
            QueryNotification::Failed { .. } => {
                state.is_loading = false;
            }
        }
        Effect::none()
    }
}
