use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::reducer::Reducer;
use crate::sequencer::SeqNo;

pub const REPORT_COMIC_SERIES: AsyncActionKinds = AsyncActionKinds::of(Domain::ReportComicSeries);

const OPERATION: &str = "ReportComicSeries";

#[derive(Debug, Clone)]
pub struct ReportParams {
    pub uuid: String,
    pub report_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    pub success: bool,
}

pub type ReportNotification = QueryNotification<ReportPayload>;

/// The report domain's actions: the query lifecycle plus an explicit reset
/// so the report dialog can be offered again after a submission.
#[derive(Debug)]
pub enum ReportAction {
    Query(ReportNotification),
    Reset,
}

/// Submits a content report. A falsy mutation result counts as a failure,
/// the same as a transport error.
pub fn submit_report_comic_series(ctx: &QueryContext, params: ReportParams) -> Effect<ReportAction> {
    let request = QueryRequest::new(
        OPERATION,
        json!({ "uuid": params.uuid, "reportType": params.report_type }),
    );
    sequenced_query(ctx, REPORT_COMIC_SERIES, request, QueryPage::first(), parse_report)
        .map(ReportAction::Query)
}

/// Clears a finished or failed submission so the dialog can be reused.
/// Sequencing state is kept; only the visible flags are wiped.
pub fn reset_report_comic_series() -> Effect<ReportAction> {
    Effect::send(ReportAction::Reset)
}

pub fn parse_report(data: Value) -> Result<ReportPayload, QueryError> {
    match data.get("reportComicSeries").and_then(Value::as_bool) {
        Some(true) => Ok(ReportPayload { success: true }),
        _ => Err(QueryError::MissingData {
            operation: OPERATION,
            field: "reportComicSeries",
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportState {
    pub is_submitting: bool,
    pub success: bool,
    pub error: Option<String>,
    pub last_seq: SeqNo,
}

#[derive(Default)]
pub struct ReportReducer;

impl Reducer<ReportState, ReportAction> for ReportReducer {
    fn reduce(&self, state: &mut ReportState, action: ReportAction) -> Effect<ReportAction> {
        let notification = match action {
            ReportAction::Reset => {
                state.is_submitting = false;
                state.success = false;
                state.error = None;
                return Effect::none();
            }
            ReportAction::Query(notification) => notification,
        };
        if notification.seq() < state.last_seq {
            return Effect::none();
        }
        match notification {
            QueryNotification::Requested { seq, .. } => {
                state.is_submitting = true;
                state.success = false;
                state.error = None;
                state.last_seq = seq;
            }
            QueryNotification::Succeeded { payload, seq, .. } => {
                state.is_submitting = false;
                state.success = payload.success;
                state.last_seq = seq;
            }
            QueryNotification::Failed { error, .. } => {
                state.is_submitting = false;
                state.error = Some(error.to_string());
            }
        }
        Effect::none()
    }
}
