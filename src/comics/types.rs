use serde::{Deserialize, Serialize};

use crate::merge::Keyed;

/// Genres a comic series can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "COMICSERIES_ACTION")]
    Action,
    #[serde(rename = "COMICSERIES_ANIMALS")]
    Animals,
    #[serde(rename = "COMICSERIES_BL")]
    Bl,
    #[serde(rename = "COMICSERIES_COMEDY")]
    Comedy,
    #[serde(rename = "COMICSERIES_CRIME")]
    Crime,
    #[serde(rename = "COMICSERIES_DRAMA")]
    Drama,
    #[serde(rename = "COMICSERIES_DYSTOPIA")]
    Dystopia,
    #[serde(rename = "COMICSERIES_EDUCATIONAL")]
    Educational,
    #[serde(rename = "COMICSERIES_FANTASY")]
    Fantasy,
    #[serde(rename = "COMICSERIES_GAMING")]
    Gaming,
    #[serde(rename = "COMICSERIES_GL")]
    Gl,
    #[serde(rename = "COMICSERIES_HAREM")]
    Harem,
    #[serde(rename = "COMICSERIES_HIGH_SCHOOL")]
    HighSchool,
    #[serde(rename = "COMICSERIES_HISTORICAL")]
    Historical,
    #[serde(rename = "COMICSERIES_HORROR")]
    Horror,
    #[serde(rename = "COMICSERIES_ISEKAI")]
    Isekai,
    #[serde(rename = "COMICSERIES_LGBTQ")]
    Lgbtq,
    #[serde(rename = "COMICSERIES_MYSTERY")]
    Mystery,
    #[serde(rename = "COMICSERIES_POST_APOCALYPTIC")]
    PostApocalyptic,
    #[serde(rename = "COMICSERIES_ROMANCE")]
    Romance,
    #[serde(rename = "COMICSERIES_SCI_FI")]
    SciFi,
    #[serde(rename = "COMICSERIES_SLICE_OF_LIFE")]
    SliceOfLife,
    #[serde(rename = "COMICSERIES_SPORTS")]
    Sports,
    #[serde(rename = "COMICSERIES_SUPERHERO")]
    Superhero,
    #[serde(rename = "COMICSERIES_SUPERNATURAL")]
    Supernatural,
    #[serde(rename = "COMICSERIES_THRILLER")]
    Thriller,
    #[serde(rename = "COMICSERIES_ZOMBIES")]
    Zombies,
}

/// Issue ordering accepted by the series and issue queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Latest,
    Oldest,
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicSeries {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre0: Option<Genre>,
    #[serde(default)]
    pub genre1: Option<Genre>,
    #[serde(default)]
    pub genre2: Option<Genre>,
    #[serde(default)]
    pub tags: Option<Vec<Option<String>>>,
    /// Stringified JSON details for the cover art.
    #[serde(default)]
    pub cover_image_as_string: Option<String>,
    #[serde(default)]
    pub banner_image_as_string: Option<String>,
    #[serde(default)]
    pub thumbnail_image_as_string: Option<String>,
    #[serde(default)]
    pub issue_count: Option<i64>,
    #[serde(default)]
    pub date_published: Option<i64>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl Keyed for ComicSeries {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicIssue {
    pub uuid: String,
    pub series_uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub creator_note: Option<String>,
    #[serde(default)]
    pub date_published: Option<i64>,
    #[serde(default)]
    pub banner_image_as_string: Option<String>,
    #[serde(default)]
    pub thumbnail_image_as_string: Option<String>,
}

impl Keyed for ComicIssue {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_image_as_string: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub comics: Option<Vec<Option<ComicSeries>>>,
}

impl Keyed for Creator {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// A curated list of comic series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub comic_series: Option<Vec<Option<ComicSeries>>>,
    #[serde(default)]
    pub tags: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub genres: Option<Vec<Option<Genre>>>,
}

impl Keyed for List {
    fn uuid(&self) -> &str {
        &self.id
    }
}
