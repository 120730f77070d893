use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{decode, require_field, QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::reducer::Reducer;
use crate::sequencer::SeqNo;

use super::comic_series::ISSUE_WINDOW;
use super::present_items;
use super::types::{ComicIssue, ComicSeries, SortOrder};

pub const GET_COMICISSUE: AsyncActionKinds = AsyncActionKinds::of(Domain::ComicIssue);

const OPERATION: &str = "GetComicIssue";

#[derive(Debug, Clone)]
pub struct ComicIssueParams {
    pub issue_uuid: String,
    pub series_uuid: String,
    pub force_refresh: bool,
}

/// The reader screen needs the issue itself, its series, and the full issue
/// index for prev/next navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct ComicIssuePayload {
    pub issue: ComicIssue,
    pub series: Option<ComicSeries>,
    pub all_issues: Vec<ComicIssue>,
}

pub type ComicIssueNotification = QueryNotification<ComicIssuePayload>;

pub fn load_comic_issue(
    ctx: &QueryContext,
    params: ComicIssueParams,
) -> Effect<ComicIssueNotification> {
    let request = QueryRequest::new(
        OPERATION,
        json!({
            "issueUuid": params.issue_uuid,
            "seriesUuid": params.series_uuid,
            "sortOrderForIssues": SortOrder::Oldest,
            "limitPerPageForIssues": ISSUE_WINDOW,
            "pageForIssues": 1,
        }),
    )
    .bypass_cache(params.force_refresh);

    sequenced_query(ctx, GET_COMICISSUE, request, QueryPage::first(), parse_comic_issue)
}

pub fn parse_comic_issue(data: Value) -> Result<ComicIssuePayload, QueryError> {
    let issue = decode(OPERATION, require_field(&data, OPERATION, "getComicIssue")?)?;
    let series = match data.get("getComicSeries") {
        Some(value) if !value.is_null() => Some(decode(OPERATION, value)?),
        _ => None,
    };
    let all_issues = present_items(
        OPERATION,
        data.get("getIssuesForComicSeries").and_then(|v| v.get("issues")),
    )?;
    Ok(ComicIssuePayload {
        issue,
        series,
        all_issues,
    })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComicIssueState {
    pub is_loading: bool,
    pub issue: Option<ComicIssue>,
    pub series: Option<ComicSeries>,
    pub all_issues: Vec<ComicIssue>,
    pub last_seq: SeqNo,
}

#[derive(Default)]
pub struct ComicIssueReducer;

impl Reducer<ComicIssueState, ComicIssueNotification> for ComicIssueReducer {
    fn reduce(
        &self,
        state: &mut ComicIssueState,
        notification: ComicIssueNotification,
    ) -> Effect<ComicIssueNotification> {
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
                state.issue = Some(payload.issue);
                state.series = payload.series;
                state.all_issues = payload.all_issues;
                state.last_seq = seq;
            }
            QueryNotification::Failed { .. } => {
                state.is_loading = false;
            }
        }
        Effect::none()
    }
}
