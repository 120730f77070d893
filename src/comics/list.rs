use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{decode, require_field, QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::reducer::Reducer;
use crate::sequencer::SeqNo;

use super::types::List;

pub const GET_LIST: AsyncActionKinds = AsyncActionKinds::of(Domain::List);

const OPERATION: &str = "GetList";

#[derive(Debug, Clone)]
pub struct ListParams {
    pub id: String,
    pub force_refresh: bool,
}

pub type ListNotification = QueryNotification<List>;

pub fn load_list(ctx: &QueryContext, params: ListParams) -> Effect<ListNotification> {
    let request =
        QueryRequest::new(OPERATION, json!({ "id": params.id })).bypass_cache(params.force_refresh);
    sequenced_query(ctx, GET_LIST, request, QueryPage::first(), parse_list)
}

pub fn parse_list(data: Value) -> Result<List, QueryError> {
    decode(OPERATION, require_field(&data, OPERATION, "getList")?)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    pub is_loading: bool,
    pub list: Option<List>,
    pub last_seq: SeqNo,
}

#[derive(Default)]
pub struct ListReducer;

impl Reducer<ListState, ListNotification> for ListReducer {
    fn reduce(&self, state: &mut ListState, notification: ListNotification) -> Effect<ListNotification> {
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
                state.list = Some(payload);
                state.last_seq = seq;
            }
            QueryNotification::Failed { .. } => {
                state.is_loading = false;
            }
        }
        Effect::none()
    }
}
