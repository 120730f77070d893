use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{require_field, QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::merge::page_filled;
use crate::paged::{PagedPayload, PagedState};
use crate::reducer::Reducer;

use super::present_items;
use super::types::{ComicSeries, Genre};

pub const COMICS_LIST: AsyncActionKinds = AsyncActionKinds::of(Domain::ComicsList);

const OPERATION: &str = "Search";

/// Browse parameters. Reuses the search operation with an empty term, since
/// browsing filters by tag and genre rather than text.
#[derive(Debug, Clone)]
pub struct ComicsListParams {
    pub page: u32,
    pub limit_per_page: usize,
    pub filter_for_types: Vec<String>,
    pub filter_for_tags: Option<Vec<String>>,
    pub filter_for_genres: Option<Vec<Genre>>,
    pub is_loading_more: bool,
    pub force_refresh: bool,
}

impl Default for ComicsListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit_per_page: 30,
            filter_for_types: vec!["COMICSERIES".to_owned()],
            filter_for_tags: None,
            filter_for_genres: None,
            is_loading_more: false,
            force_refresh: false,
        }
    }
}

pub type ComicsListNotification = QueryNotification<PagedPayload<ComicSeries>>;

pub fn fetch_comics(ctx: &QueryContext, params: ComicsListParams) -> Effect<ComicsListNotification> {
    let limit_per_page = params.limit_per_page;
    let page = QueryPage {
        page: params.page,
        is_loading_more: params.is_loading_more,
    };
    let request = QueryRequest::new(
        OPERATION,
        json!({
            "term": "",
            "page": params.page,
            "limitPerPage": params.limit_per_page,
            "filterForTypes": params.filter_for_types,
            "filterForTags": params.filter_for_tags,
            "filterForGenres": params.filter_for_genres,
        }),
    )
    .bypass_cache(params.force_refresh);

    sequenced_query(ctx, COMICS_LIST, request, page, move |data| {
        parse_comics_list(data, limit_per_page)
    })
}

pub fn parse_comics_list(
    data: Value,
    limit_per_page: usize,
) -> Result<PagedPayload<ComicSeries>, QueryError> {
    let search = require_field(&data, OPERATION, "search")?;
    let comics: Vec<ComicSeries> = present_items(OPERATION, search.get("comicSeries"))?;
    let has_more = page_filled(comics.len(), limit_per_page);
    Ok(PagedPayload {
        items: comics,
        has_more,
    })
}

pub type ComicsListState = PagedState<ComicSeries>;

#[derive(Default)]
pub struct ComicsListReducer;

impl Reducer<ComicsListState, ComicsListNotification> for ComicsListReducer {
    fn reduce(
        &self,
        state: &mut ComicsListState,
        notification: ComicsListNotification,
    ) -> Effect<ComicsListNotification> {
        state.apply(notification);
        Effect::none()
    }
}
