use std::sync::Arc;

use crate::executor::QueryError;
use crate::sequencer::SeqNo;

/// One logical resource category with its own view-model and reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    HomeFeed,
    ComicSeries,
    ComicIssue,
    Creator,
    List,
    Search,
    ComicsList,
    ReportComicSeries,
}

impl Domain {
    pub const fn tag(self) -> &'static str {
        match self {
            Domain::HomeFeed => "GET_HOMEFEED",
            Domain::ComicSeries => "GET_COMICSERIES",
            Domain::ComicIssue => "GET_COMICISSUE",
            Domain::Creator => "GET_CREATOR",
            Domain::List => "GET_LIST",
            Domain::Search => "SEARCH",
            Domain::ComicsList => "COMICS_LIST",
            Domain::ReportComicSeries => "REPORT_COMIC_SERIES",
        }
    }
}

/// Pagination coordinates of one query attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPage {
    /// 1-based page number.
    pub page: u32,
    /// Distinguishes "load more" from a fresh query.
    pub is_loading_more: bool,
}

impl QueryPage {
    pub fn first() -> Self {
        Self {
            page: 1,
            is_loading_more: false,
        }
    }

    pub fn more(page: u32) -> Self {
        Self {
            page,
            is_loading_more: true,
        }
    }
}

/// The matched request/success/failure triple for one domain, plus the
/// constructors for its notifications. Pure factory; the kind names are
/// `'static` so the output is referentially stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsyncActionKinds {
    pub domain: Domain,
    pub request: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

macro_rules! kinds {
    ($domain:expr, $tag:literal) => {
        AsyncActionKinds {
            domain: $domain,
            request: concat!($tag, "_REQUEST"),
            success: concat!($tag, "_SUCCESS"),
            failure: concat!($tag, "_FAILURE"),
        }
    };
}

impl AsyncActionKinds {
    pub const fn of(domain: Domain) -> Self {
        match domain {
            Domain::HomeFeed => kinds!(domain, "GET_HOMEFEED"),
            Domain::ComicSeries => kinds!(domain, "GET_COMICSERIES"),
            Domain::ComicIssue => kinds!(domain, "GET_COMICISSUE"),
            Domain::Creator => kinds!(domain, "GET_CREATOR"),
            Domain::List => kinds!(domain, "GET_LIST"),
            Domain::Search => kinds!(domain, "SEARCH"),
            Domain::ComicsList => kinds!(domain, "COMICS_LIST"),
            Domain::ReportComicSeries => kinds!(domain, "REPORT_COMIC_SERIES"),
        }
    }

    pub fn requested<P>(&self, page: QueryPage, seq: SeqNo) -> QueryNotification<P> {
        QueryNotification::Requested {
            page: page.page,
            is_loading_more: page.is_loading_more,
            seq,
        }
    }

    pub fn succeeded<P>(&self, payload: P, page: u32, seq: SeqNo) -> QueryNotification<P> {
        QueryNotification::Succeeded { payload, page, seq }
    }

    pub fn failed<P>(&self, error: QueryError, seq: SeqNo) -> QueryNotification<P> {
        QueryNotification::Failed {
            error: Arc::new(error),
            seq,
        }
    }

    /// Wire-style name of a notification, e.g. `SEARCH_SUCCESS`.
    pub fn kind_name<P>(&self, notification: &QueryNotification<P>) -> &'static str {
        match notification {
            QueryNotification::Requested { .. } => self.request,
            QueryNotification::Succeeded { .. } => self.success,
            QueryNotification::Failed { .. } => self.failure,
        }
    }
}

/// Outcome notifications of one query attempt, each tagged with the
/// sequence number of the request it originated from.
#[derive(Debug, Clone)]
pub enum QueryNotification<P> {
    Requested {
        page: u32,
        is_loading_more: bool,
        seq: SeqNo,
    },
    Succeeded {
        payload: P,
        page: u32,
        seq: SeqNo,
    },
    Failed {
        error: Arc<QueryError>,
        seq: SeqNo,
    },
}

impl<P> QueryNotification<P> {
    pub fn seq(&self) -> SeqNo {
        match self {
            QueryNotification::Requested { seq, .. }
            | QueryNotification::Succeeded { seq, .. }
            | QueryNotification::Failed { seq, .. } => *seq,
        }
    }

    /// The `error` discriminant: true exactly for `Failed`.
    pub fn is_error(&self) -> bool {
        matches!(self, QueryNotification::Failed { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_follow_the_domain_tag() {
        let kinds = AsyncActionKinds::of(Domain::Search);
        assert_eq!(kinds.request, "SEARCH_REQUEST");
        assert_eq!(kinds.success, "SEARCH_SUCCESS");
        assert_eq!(kinds.failure, "SEARCH_FAILURE");

        let kinds = AsyncActionKinds::of(Domain::ComicsList);
        assert_eq!(kinds.request, "COMICS_LIST_REQUEST");
        assert_eq!(kinds.failure, "COMICS_LIST_FAILURE");
    }

    #[test]
    fn every_domain_prefixes_its_tag() {
        let domains = [
            Domain::HomeFeed,
            Domain::ComicSeries,
            Domain::ComicIssue,
            Domain::Creator,
            Domain::List,
            Domain::Search,
            Domain::ComicsList,
            Domain::ReportComicSeries,
        ];
        for domain in domains {
            let kinds = AsyncActionKinds::of(domain);
            assert_eq!(kinds.domain, domain);
            assert_eq!(kinds.request, format!("{}_REQUEST", domain.tag()));
            assert_eq!(kinds.success, format!("{}_SUCCESS", domain.tag()));
            assert_eq!(kinds.failure, format!("{}_FAILURE", domain.tag()));
        }
    }

    #[test]
    fn only_failures_carry_the_error_flag() {
        let kinds = AsyncActionKinds::of(Domain::List);
        let seq = SeqNo::default();
        let requested: QueryNotification<()> = kinds.requested(QueryPage::first(), seq);
        let succeeded: QueryNotification<()> = kinds.succeeded((), 1, seq);
        let failed: QueryNotification<()> = kinds.failed(
            QueryError::MissingData {
                operation: "GetList",
                field: "getList",
            },
            seq,
        );

        assert!(!requested.is_error());
        assert!(!succeeded.is_error());
        assert!(failed.is_error());

        assert_eq!(kinds.kind_name(&requested), "GET_LIST_REQUEST");
        assert_eq!(kinds.kind_name(&succeeded), "GET_LIST_SUCCESS");
        assert_eq!(kinds.kind_name(&failed), "GET_LIST_FAILURE");
    }
}
