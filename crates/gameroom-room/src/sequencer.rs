//! The room-wide event order.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues bookmarks: one room-wide, strictly increasing number per
/// outbound event.
///
/// Starts at 0 and lives as long as the process. Concurrent callers each
/// get a distinct value and together see no gaps.
#[derive(Debug, Default)]
pub struct BookmarkSequencer {
    next: AtomicU64,
}

impl BookmarkSequencer {
    /// A sequencer whose first bookmark is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next bookmark.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The bookmark the next call to [`next`](Self::next) would return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}
