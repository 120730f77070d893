use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

use crate::action::{AsyncActionKinds, Domain, QueryNotification, QueryPage};
use crate::effect::Effect;
use crate::executor::{QueryContext, QueryError, QueryRequest};
use crate::loader::sequenced_query;
use crate::reducer::Reducer;
use crate::sequencer::SeqNo;

use super::present_items;
use super::types::{ComicSeries, List};

pub const GET_HOMEFEED: AsyncActionKinds = AsyncActionKinds::of(Domain::HomeFeed);

const OPERATION: &str = "HomeScreen";

/// How many shuffled most-popular series the feed surfaces.
pub const MOST_POPULAR_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeedPayload {
    /// One randomly featured series, empty when none are available.
    pub featured: Vec<ComicSeries>,
    pub curated_lists: Vec<List>,
    pub most_popular: Vec<ComicSeries>,
    pub recently_added: Vec<ComicSeries>,
    pub recently_updated: Vec<ComicSeries>,
}

pub type HomeFeedNotification = QueryNotification<HomeFeedPayload>;

/// Loads and assembles the home feed. The randomness behind the featured
/// pick and the most-popular shuffle is injected so feed assembly stays
/// reproducible under test.
pub fn load_home_feed<R>(ctx: &QueryContext, force_refresh: bool, rng: R) -> Effect<HomeFeedNotification>
where
    R: Rng + Send + 'static,
{
    let request = QueryRequest::new(OPERATION, json!({})).bypass_cache(force_refresh);
    sequenced_query(ctx, GET_HOMEFEED, request, QueryPage::first(), move |data| {
        parse_home_feed(data, rng)
    })
}

pub fn parse_home_feed<R: Rng>(data: Value, mut rng: R) -> Result<HomeFeedPayload, QueryError> {
    if !data.is_object() {
        return Err(QueryError::MissingData {
            operation: OPERATION,
            field: "data",
        });
    }

    let featured = present_items(
        OPERATION,
        data.get("getFeaturedComicSeries").and_then(|v| v.get("comicSeries")),
    )?;
    let curated_lists = present_items(
        OPERATION,
        data.get("getCuratedLists").and_then(|v| v.get("lists")),
    )?;
    let most_popular = present_items(
        OPERATION,
        data.get("getMostPopularComicSeries").and_then(|v| v.get("comicSeries")),
    )?;
    let recently_added = present_items(
        OPERATION,
        data.get("getRecentlyAddedComicSeries").and_then(|v| v.get("comicSeries")),
    )?;
    let recently_updated = present_items(
        OPERATION,
        data.get("getRecentlyUpdatedComicSeries").and_then(|v| v.get("comicSeries")),
    )?;

    Ok(HomeFeedPayload {
        featured: pick_featured(featured, &mut rng),
        curated_lists,
        most_popular: shuffle_and_limit(most_popular, MOST_POPULAR_LIMIT, &mut rng),
        recently_added,
        recently_updated,
    })
}

fn pick_featured<R: Rng>(mut series: Vec<ComicSeries>, rng: &mut R) -> Vec<ComicSeries> {
    if series.is_empty() {
        return series;
    }
    let index = rng.gen_range(0..series.len());
    vec![series.swap_remove(index)]
}

fn shuffle_and_limit<R: Rng>(mut series: Vec<ComicSeries>, limit: usize, rng: &mut R) -> Vec<ComicSeries> {
    series.shuffle(rng);
    series.truncate(limit);
    series
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeFeedState {
    pub is_loading: bool,
    pub featured: Vec<ComicSeries>,
    pub curated_lists: Vec<List>,
    pub most_popular: Vec<ComicSeries>,
    pub recently_added: Vec<ComicSeries>,
    pub recently_updated: Vec<ComicSeries>,
    pub last_seq: SeqNo,
}

#[derive(Default)]
pub struct HomeFeedReducer;

impl Reducer<HomeFeedState, HomeFeedNotification> for HomeFeedReducer {
    fn reduce(
        &self,
        state: &mut HomeFeedState,
        notification: HomeFeedNotification,
    ) -> Effect<HomeFeedNotification> {
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
                state.featured = payload.featured;
                state.curated_lists = payload.curated_lists;
                state.most_popular = payload.most_popular;
                state.recently_added = payload.recently_added;
                state.recently_updated = payload.recently_updated;
                state.last_seq = seq;
            }
            QueryNotification::Failed { .. } => {
                state.is_loading = false;
            }
        }
        Effect::none()
    }
}
