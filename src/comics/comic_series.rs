use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{decode, require_field, QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::reducer::Reducer;
use crate::sequencer::SeqNo;

use super::present_items;
use super::types::{ComicIssue, ComicSeries, SortOrder};

pub const GET_COMICSERIES: AsyncActionKinds = AsyncActionKinds::of(Domain::ComicSeries);

const OPERATION: &str = "GetComicSeries";

// The reader loads the whole issue index in one window.
pub(crate) const ISSUE_WINDOW: usize = 1000;

#[derive(Debug, Clone)]
pub struct ComicSeriesParams {
    pub uuid: String,
    pub force_refresh: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComicSeriesPayload {
    pub series: ComicSeries,
    pub issues: Vec<ComicIssue>,
}

pub type ComicSeriesNotification = QueryNotification<ComicSeriesPayload>;

pub fn load_comic_series(
    ctx: &QueryContext,
    params: ComicSeriesParams,
) -> Effect<ComicSeriesNotification> {
    let request = QueryRequest::new(
        OPERATION,
        json!({
            "uuid": params.uuid,
            "sortOrderForIssues": SortOrder::Oldest,
            "limitPerPageForIssues": ISSUE_WINDOW,
            "pageForIssues": 1,
        }),
    )
    .bypass_cache(params.force_refresh);

    sequenced_query(ctx, GET_COMICSERIES, request, QueryPage::first(), parse_comic_series)
}

pub fn parse_comic_series(data: Value) -> Result<ComicSeriesPayload, QueryError> {
    let series = decode(OPERATION, require_field(&data, OPERATION, "getComicSeries")?)?;
    let issues = present_items(
        OPERATION,
        data.get("getIssuesForComicSeries").and_then(|v| v.get("issues")),
    )?;
    Ok(ComicSeriesPayload { series, issues })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComicSeriesState {
    pub is_loading: bool,
    pub series: Option<ComicSeries>,
    pub issues: Vec<ComicIssue>,
    pub last_seq: SeqNo,
}

#[derive(Default)]
pub struct ComicSeriesReducer;

impl Reducer<ComicSeriesState, ComicSeriesNotification> for ComicSeriesReducer {
    fn reduce(
        &self,
        state: &mut ComicSeriesState,
        notification: ComicSeriesNotification,
    ) -> Effect<ComicSeriesNotification> {
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
                state.series = Some(payload.series);
                state.issues = payload.issues;
                state.last_seq = seq;
            }
            QueryNotification::Failed { .. } => {
                state.is_loading = false;
            }
        }
        Effect::none()
    }
}
