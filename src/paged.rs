use crate::action::QueryNotification;
use crate::merge::{merge_by_uuid, Keyed};
use crate::sequencer::SeqNo;

/// Success payload for list-like domains.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedPayload<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// View-model shared by every list-like domain. `last_seq` is non-decreasing
/// for the lifetime of the state; any notification older than it is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedState<T> {
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub items: Vec<T>,
    pub has_more: bool,
    pub last_seq: SeqNo,
}

impl<T> Default for PagedState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            is_loading_more: false,
            items: Vec::new(),
            has_more: false,
            last_seq: SeqNo::default(),
        }
    }
}

impl<T: Keyed> PagedState<T> {
    fn is_stale(&self, seq: SeqNo) -> bool {
        seq < self.last_seq
    }

    /// Requested transition. Returns false when the notification is stale
    /// and was ignored.
    pub fn begin(&mut self, is_loading_more: bool, seq: SeqNo) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.is_loading_more = is_loading_more;
        self.is_loading = !is_loading_more;
        self.last_seq = seq;
        true
    }

    /// Succeeded transition: pages past the first merge into the existing
    /// items by uuid, a fresh query replaces them wholesale.
    pub fn complete(&mut self, items: Vec<T>, has_more: bool, page: u32, seq: SeqNo) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.items = if page > 1 {
            merge_by_uuid(std::mem::take(&mut self.items), items)
        } else {
            items
        };
        self.has_more = has_more;
        self.is_loading = false;
        self.is_loading_more = false;
        self.last_seq = seq;
        true
    }

    /// Failed transition: loading flags clear, items stay at their
    /// last-known-good value, `last_seq` never moves here.
    pub fn fail(&mut self, seq: SeqNo) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.is_loading = false;
        self.is_loading_more = false;
        true
    }

    /// Folds a whole notification through the transitions above.
    pub fn apply(&mut self, notification: QueryNotification<PagedPayload<T>>) -> bool {
        match notification {
            QueryNotification::Requested {
                is_loading_more,
                seq,
                ..
            } => self.begin(is_loading_more, seq),
            QueryNotification::Succeeded { payload, page, seq } => {
                self.complete(payload.items, payload.has_more, page, seq)
            }
            QueryNotification::Failed { seq, .. } => self.fail(seq),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sequencer::RequestSequencer;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        uuid: String,
    }

    impl Keyed for Row {
        fn uuid(&self) -> &str {
            &self.uuid
        }
    }

    fn rows(uuids: &[&str]) -> Vec<Row> {
        uuids.iter().map(|u| Row { uuid: u.to_string() }).collect()
    }

    fn uuids(state: &PagedState<Row>) -> Vec<String> {
        state.items.iter().map(|r| r.uuid.clone()).collect()
    }

    #[test]
    fn later_request_wins_even_if_earlier_completes_last() {
        let sequencer = RequestSequencer::new();
        let seq1 = sequencer.next();
        let seq2 = sequencer.next();
        let mut state = PagedState::<Row>::default();

        assert!(state.begin(false, seq1));
        assert!(state.begin(false, seq2));
        // seq2's completion arrives first; seq1's is now stale.
        assert!(state.complete(rows(&["b"]), false, 1, seq2));
        assert!(!state.complete(rows(&["a"]), false, 1, seq1));

        assert_eq!(uuids(&state), vec!["b"]);
        assert!(!state.is_loading);
        assert_eq!(state.last_seq, seq2);
    }

    #[test]
    fn last_seq_never_decreases() {
        let sequencer = RequestSequencer::new();
        let seqs: Vec<_> = (0..6).map(|_| sequencer.next()).collect();
        let mut state = PagedState::<Row>::default();

        let mut watermark = state.last_seq;
        state.begin(false, seqs[3]);
        for (applied, stale) in [(3usize, 0usize), (4, 1), (5, 2)] {
            state.complete(rows(&["x"]), false, 1, seqs[applied]);
            assert!(state.last_seq >= watermark);
            watermark = state.last_seq;

            state.begin(true, seqs[stale]);
            state.fail(seqs[stale]);
            assert!(state.last_seq >= watermark);
        }
        assert_eq!(state.last_seq, seqs[5]);
    }

    #[test]
    fn stale_notifications_leave_state_unchanged() {
        let sequencer = RequestSequencer::new();
        let seq1 = sequencer.next();
        let seq2 = sequencer.next();
        let mut state = PagedState::<Row>::default();
        state.begin(false, seq2);
        let snapshot = state.clone();

        assert!(!state.begin(true, seq1));
        assert_eq!(state, snapshot);
        assert!(!state.complete(rows(&["a"]), true, 1, seq1));
        assert_eq!(state, snapshot);
        assert!(!state.fail(seq1));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn pagination_merges_without_duplicates() {
        let sequencer = RequestSequencer::new();
        let mut state = PagedState::<Row>::default();
        state.complete(rows(&["a"]), true, 1, sequencer.next());

        state.complete(rows(&["a", "b"]), true, 2, sequencer.next());
        assert_eq!(uuids(&state), vec!["a", "b"]);
    }

    #[test]
    fn fresh_query_replaces_wholesale() {
        let sequencer = RequestSequencer::new();
        let mut state = PagedState::<Row>::default();
        state.complete(rows(&["a", "b", "c"]), true, 2, sequencer.next());

        state.complete(rows(&["z"]), false, 1, sequencer.next());
        assert_eq!(uuids(&state), vec!["z"]);
        assert!(!state.has_more);
    }

    #[test]
    fn requested_sets_the_matching_loading_flag() {
        let sequencer = RequestSequencer::new();
        let mut state = PagedState::<Row>::default();

        state.begin(false, sequencer.next());
        assert!(state.is_loading);
        assert!(!state.is_loading_more);

        state.begin(true, sequencer.next());
        assert!(!state.is_loading);
        assert!(state.is_loading_more);
    }

    #[test]
    fn failure_clears_flags_and_keeps_items() {
        let sequencer = RequestSequencer::new();
        let mut state = PagedState::<Row>::default();
        state.complete(rows(&["a"]), false, 1, sequencer.next());

        let seq = sequencer.next();
        state.begin(false, seq);
        state.fail(seq);
        assert!(!state.is_loading);
        assert!(!state.is_loading_more);
        assert_eq!(uuids(&state), vec!["a"]);
    }
}
