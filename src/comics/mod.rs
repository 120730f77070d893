//! The comics-reading view-model layer: one module per data domain, each
//! with its loader, payload transform, state, and reducer, composed into a
//! single app-level store at the bottom of this module.

pub mod comic_issue;
pub mod comic_series;
pub mod comics_list;
pub mod creator;
pub mod home_feed;
pub mod list;
pub mod report;
pub mod search;
pub mod types;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::effect::Effect;
use crate::executor::{decode, QueryError};
use crate::reducer::Reducer;

use comic_issue::{ComicIssueNotification, ComicIssueReducer, ComicIssueState};
use comic_series::{ComicSeriesNotification, ComicSeriesReducer, ComicSeriesState};
use comics_list::{ComicsListNotification, ComicsListReducer, ComicsListState};
use creator::{CreatorNotification, CreatorReducer, CreatorState};
use home_feed::{HomeFeedNotification, HomeFeedReducer, HomeFeedState};
use list::{ListNotification, ListReducer, ListState};
use report::{ReportAction, ReportReducer, ReportState};
use search::{SearchNotification, SearchReducer, SearchState};

/// Decodes a nullable collection field, dropping null entries. A malformed
/// entry fails the whole transform; partial results never masquerade as
/// complete ones.
pub(crate) fn present_items<T: DeserializeOwned>(
    operation: &'static str,
    value: Option<&Value>,
) -> Result<Vec<T>, QueryError> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| !entry.is_null())
            .map(|entry| decode(operation, entry))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Root view-model: every domain's state under one store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub home_feed: HomeFeedState,
    pub comic_series: ComicSeriesState,
    pub comic_issue: ComicIssueState,
    pub creator: CreatorState,
    pub list: ListState,
    pub search: SearchState,
    pub comics_list: ComicsListState,
    pub report: ReportState,
}

#[derive(Debug)]
pub enum AppAction {
    HomeFeed(HomeFeedNotification),
    ComicSeries(ComicSeriesNotification),
    ComicIssue(ComicIssueNotification),
    Creator(CreatorNotification),
    List(ListNotification),
    Search(SearchNotification),
    ComicsList(ComicsListNotification),
    Report(ReportAction),
}

/// Delegates each domain's notifications to its reducer and lifts the
/// resulting effects back into the app action space.
#[derive(Default)]
pub struct AppReducer {
    home_feed: HomeFeedReducer,
    comic_series: ComicSeriesReducer,
    comic_issue: ComicIssueReducer,
    creator: CreatorReducer,
    list: ListReducer,
    search: SearchReducer,
    comics_list: ComicsListReducer,
    report: ReportReducer,
}

impl Reducer<AppState, AppAction> for AppReducer {
    fn reduce(&self, state: &mut AppState, action: AppAction) -> Effect<AppAction> {
        match action {
            AppAction::HomeFeed(note) => self
                .home_feed
                .reduce(&mut state.home_feed, note)
                .map(AppAction::HomeFeed),
            AppAction::ComicSeries(note) => self
                .comic_series
                .reduce(&mut state.comic_series, note)
                .map(AppAction::ComicSeries),
            AppAction::ComicIssue(note) => self
                .comic_issue
                .reduce(&mut state.comic_issue, note)
                .map(AppAction::ComicIssue),
            AppAction::Creator(note) => self
                .creator
                .reduce(&mut state.creator, note)
                .map(AppAction::Creator),
            AppAction::List(note) => self.list.reduce(&mut state.list, note).map(AppAction::List),
            AppAction::Search(note) => self
                .search
                .reduce(&mut state.search, note)
                .map(AppAction::Search),
            AppAction::ComicsList(note) => self
                .comics_list
                .reduce(&mut state.comics_list, note)
                .map(AppAction::ComicsList),
            AppAction::Report(note) => self
                .report
                .reduce(&mut state.report, note)
                .map(AppAction::Report),
        }
    }
}
