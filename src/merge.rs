use std::collections::HashSet;

/// Items that carry a stable unique identifier.
pub trait Keyed {
    fn uuid(&self) -> &str;
}

/// Appends `incoming` onto `existing`, skipping items whose uuid is already
/// present. Existing items and their order are left untouched (no
/// overwrite-on-duplicate); incoming uniques keep their relative order.
pub fn merge_by_uuid<T: Keyed>(mut existing: Vec<T>, incoming: Vec<T>) -> Vec<T> {
    let seen: HashSet<String> = existing.iter().map(|item| item.uuid().to_owned()).collect();
    existing.extend(incoming.into_iter().filter(|item| !seen.contains(item.uuid())));
    existing
}

/// Exact-page-size "has more" heuristic: a full page is assumed to have a
/// successor, a short page is not. An approximation, not a server cursor.
pub fn page_filled(returned: usize, page_size: usize) -> bool {
    returned == page_size
}
