use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{require_field, QueryContext, QueryError, QueryRequest};
use crate::loader::debounced_query;
use crate::paged::PagedState;
use crate::reducer::Reducer;

use super::present_items;
use super::types::{ComicSeries, Genre};

pub const SEARCH: AsyncActionKinds = AsyncActionKinds::of(Domain::Search);

const OPERATION: &str = "Search";

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub term: String,
    pub page: u32,
    pub limit_per_page: usize,
    pub filter_for_types: Vec<String>,
    pub filter_for_tags: Option<Vec<String>>,
    pub filter_for_genres: Option<Vec<Genre>>,
    pub force_refresh: bool,
}

impl SearchParams {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
            limit_per_page: 20,
            filter_for_types: vec!["COMICSERIES".to_owned()],
            filter_for_tags: None,
            filter_for_genres: None,
            force_refresh: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPayload {
    pub results: Vec<ComicSeries>,
    /// Server-issued identifier tying result pages to one search session.
    pub search_id: String,
}

pub type SearchNotification = QueryNotification<SearchPayload>;

/// Issues a debounced search. The `Requested` notification fires right away;
/// the network call waits out the quiescence window, so a retyping user
/// issues only one query and older in-flight results lose to newer ones.
pub fn search_comics(ctx: &QueryContext, params: SearchParams) -> Effect<SearchNotification> {
    let page = QueryPage {
        page: params.page,
        is_loading_more: false,
    };
    let request = QueryRequest::new(
        OPERATION,
        json!({
            "term": params.term,
            "page": params.page,
            "limitPerPage": params.limit_per_page,
            "filterForTypes": params.filter_for_types,
            "filterForTags": params.filter_for_tags,
            "filterForGenres": params.filter_for_genres,
        }),
    )
    .bypass_cache(params.force_refresh);

    debounced_query(ctx, SEARCH, request, page, parse_search)
}

pub fn parse_search(data: Value) -> Result<SearchPayload, QueryError> {
    let search = require_field(&data, OPERATION, "search")?;
    let results = present_items(OPERATION, search.get("comicSeries"))?;
    let search_id = search
        .get("searchId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    Ok(SearchPayload { results, search_id })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub paged: PagedState<ComicSeries>,
    pub search_id: String,
}

#[derive(Default)]
pub struct SearchReducer;

impl Reducer<SearchState, SearchNotification> for SearchReducer {
    fn reduce(&self, state: &mut SearchState, notification: SearchNotification) -> Effect<SearchNotification> {
        match notification {
            QueryNotification::Requested {
                is_loading_more,
                seq,
                ..
            } => {
                state.paged.begin(is_loading_more, seq);
            }
            QueryNotification::Succeeded { payload, page, seq } => {
                if state.paged.complete(payload.results, false, page, seq) {
                    state.search_id = payload.search_id;
                }
            }
            QueryNotification::Failed { seq, .. } => {
                state.paged.fail(seq);
            }
        }
        Effect::none()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::comics::types::fixtures::{series, series_json};
    use crate::sequencer::RequestSequencer;

    #[test]
    fn parse_drops_null_entries_and_reads_the_session_id() {
        let payload = parse_search(json!({
            "search": {
                "searchId": "sess-1",
                "comicSeries": [series_json("a"), null, series_json("b")],
            }
        }))
        .unwrap();

        assert_eq!(payload.search_id, "sess-1");
        let uuids: Vec<_> = payload.results.iter().map(|s| s.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["a", "b"]);
    }

    #[test]
    fn parse_requires_the_search_field() {
        let err = parse_search(json!({ "search": null })).unwrap_err();
        assert!(matches!(err, QueryError::MissingData { field: "search", .. }));
    }

    #[test]
    fn parse_tolerates_an_absent_result_list() {
        let payload = parse_search(json!({ "search": { "searchId": "s" } })).unwrap();
        assert!(payload.results.is_empty());
    }

    #[test]
    fn stale_success_does_not_clobber_a_newer_search() {
        let sequencer = RequestSequencer::new();
        let seq1 = sequencer.next();
        let seq2 = sequencer.next();
        let reducer = SearchReducer;
        let mut state = SearchState::default();

        reducer.reduce(&mut state, SEARCH.requested(QueryPage::first(), seq1));
        reducer.reduce(&mut state, SEARCH.requested(QueryPage::first(), seq2));
        reducer.reduce(
            &mut state,
            SEARCH.succeeded(
                SearchPayload {
                    results: vec![series("new")],
                    search_id: "sess-2".into(),
                },
                1,
                seq2,
            ),
        );
        // The older request resolves last and must be ignored.
        reducer.reduce(
            &mut state,
            SEARCH.succeeded(
                SearchPayload {
                    results: vec![series("old")],
                    search_id: "sess-1".into(),
                },
                1,
                seq1,
            ),
        );

        assert_eq!(state.paged.items.len(), 1);
        assert_eq!(state.paged.items[0].uuid, "new");
        assert_eq!(state.search_id, "sess-2");
        assert!(!state.paged.is_loading);
    }

    #[test]
    fn failure_keeps_the_last_known_results() {
        let sequencer = RequestSequencer::new();
        let reducer = SearchReducer;
        let mut state = SearchState::default();

        let seq1 = sequencer.next();
        reducer.reduce(&mut state, SEARCH.requested(QueryPage::first(), seq1));
        reducer.reduce(
            &mut state,
            SEARCH.succeeded(
                SearchPayload {
                    results: vec![series("kept")],
                    search_id: "sess".into(),
                },
                1,
                seq1,
            ),
        );

        let seq2 = sequencer.next();
        reducer.reduce(&mut state, SEARCH.requested(QueryPage::first(), seq2));
        reducer.reduce(
            &mut state,
            SEARCH.failed(
                QueryError::MissingData {
                    operation: "Search",
                    field: "search",
                },
                seq2,
            ),
        );

        assert!(!state.paged.is_loading);
        assert_eq!(state.paged.items[0].uuid, "kept");
    }
}
