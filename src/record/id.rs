use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

/// Issues record ids derived from creation time in milliseconds.
///
/// Each id is strictly greater than the last one issued and skips any id
/// already present in the collection, so two creates in the same millisecond
/// (or a seed record that happens to look like a timestamp) never collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a collection currently holding `existing`.
    ///
    /// Callers serialize access (the store calls this under its write lock).
    pub fn next<'a>(&self, now_millis: i64, existing: impl IntoIterator<Item = &'a str>) -> String {
        let taken: HashSet<&str> = existing.into_iter().collect();
        let mut candidate = now_millis.max(self.last.load(Ordering::Acquire).saturating_add(1));
        while taken.contains(candidate.to_string().as_str()) {
            candidate += 1;
        }
        self.last.store(candidate, Ordering::Release);
        candidate.to_string()
    }
}
