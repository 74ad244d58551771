//! Incremental paginated feed loading.
//!
//! [`FeedLoader`] maintains an append-only, de-duplicated, ordered
//! projection of one owner's items, fetched lazily in fixed-size pages from
//! an [`ItemSource`]. The source is constructed already scoped to an owner
//! identity and returns pages newest-first along with an opaque
//! continuation cursor; a page without a cursor marks the end of the data.
//!
//! Concurrency discipline: page N+1 is never requested before page N's
//! response (or failure) has been observed. `load_more` takes `&mut self`,
//! so the borrow checker enforces at most one in-flight fetch; the
//! `is_loading` flag additionally makes the guard observable to callers
//! that poll the loader from a rendering loop.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// A record the loader can de-duplicate by its store-assigned id.
pub trait FeedRecord {
    fn id(&self) -> Uuid;
}

/// One page of records plus the cursor for the next page.
///
/// `next_cursor` of `None` signals that the store has no further data.
#[derive(Debug)]
pub struct SourcePage<R, C> {
    pub records: Vec<R>,
    pub next_cursor: Option<C>,
}

/// An owner-scoped, cursor-paginated record source.
#[async_trait]
pub trait ItemSource {
    type Record: FeedRecord + Send;
    type Cursor: Clone + Send + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one page of at most `limit` records, starting after `cursor`
    /// (or from the newest record when `cursor` is `None`).
    async fn fetch_page(
        &self,
        cursor: Option<&Self::Cursor>,
        limit: i64,
    ) -> Result<SourcePage<Self::Record, Self::Cursor>, Self::Error>;
}

/// What a `load_more` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// One page was fetched; this many previously unseen records were appended.
    Loaded(usize),
    /// A precondition did not hold (already loading, or no more data); no
    /// fetch was issued and no state changed.
    Skipped,
}

/// Append-only paginated projection of an item feed.
pub struct FeedLoader<S: ItemSource> {
    source: S,
    items: Vec<S::Record>,
    seen: HashSet<Uuid>,
    cursor: Option<S::Cursor>,
    has_more: bool,
    is_loading: bool,
    page_size: i64,
}

/// Resets the loading flag when dropped, so a loader future dropped
/// mid-fetch (view teardown) leaves the loader usable rather than wedged.
struct LoadingGuard<'a>(&'a mut bool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl<S: ItemSource> FeedLoader<S> {
    /// Create a loader with the default page size.
    pub fn new(source: S) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(source: S, page_size: i64) -> Self {
        Self {
            source,
            items: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            has_more: true,
            is_loading: false,
            page_size,
        }
    }

    /// Fetch and merge the next page.
    ///
    /// A call while a fetch is in flight or after the feed is exhausted is a
    /// silent no-op ([`LoadOutcome::Skipped`]), not an error. Exactly one
    /// page fetch is issued per effective call and there is no retry; on
    /// failure the error is returned with `items`, `cursor`, and `has_more`
    /// unchanged, and a later call re-attempts from the same cursor.
    ///
    /// Records whose id is already present are skipped, which guards
    /// against duplicate delivery on rapid re-triggering.
    pub async fn load_more(&mut self) -> Result<LoadOutcome, S::Error> {
        if self.is_loading || !self.has_more {
            return Ok(LoadOutcome::Skipped);
        }

        self.is_loading = true;
        let _guard = LoadingGuard(&mut self.is_loading);

        let page = self
            .source
            .fetch_page(self.cursor.as_ref(), self.page_size)
            .await?;

        let mut appended = 0;
        for record in page.records {
            if self.seen.insert(record.id()) {
                self.items.push(record);
                appended += 1;
            }
        }

        self.cursor = page.next_cursor;
        if self.cursor.is_none() {
            self.has_more = false;
        }

        Ok(LoadOutcome::Loaded(appended))
    }

    /// The records loaded so far, in delivery order (newest first).
    pub fn items(&self) -> &[S::Record] {
        &self.items
    }

    /// Consume the loader, returning the loaded records.
    pub fn into_items(self) -> Vec<S::Record> {
        self.items
    }

    /// Whether the store may still have unloaded records.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    #[derive(Debug, Clone)]
    struct Rec {
        id: Uuid,
        label: &'static str,
    }

    impl FeedRecord for Rec {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("backend unavailable")]
    struct ScriptError;

    /// Replays a scripted sequence of page results.
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<SourcePage<Rec, u32>, ScriptError>>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<SourcePage<Rec, u32>, ScriptError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
            }
        }

        fn remaining(&self) -> usize {
            self.pages.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ItemSource for ScriptedSource {
        type Record = Rec;
        type Cursor = u32;
        type Error = ScriptError;

        async fn fetch_page(
            &self,
            _cursor: Option<&u32>,
            _limit: i64,
        ) -> Result<SourcePage<Rec, u32>, ScriptError> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch beyond script")
        }
    }

    fn rec(label: &'static str) -> Rec {
        Rec {
            id: Uuid::new_v4(),
            label,
        }
    }

    fn page(records: Vec<Rec>, next_cursor: Option<u32>) -> Result<SourcePage<Rec, u32>, ScriptError> {
        Ok(SourcePage {
            records,
            next_cursor,
        })
    }

    #[tokio::test]
    async fn test_duplicate_ids_across_pages_are_skipped() {
        let a = rec("a");
        let b = rec("b");
        let c = rec("c");
        // Page 2 redelivers `b`, as a rapid re-trigger against a moving
        // collection can cause.
        let source = ScriptedSource::new(vec![
            page(vec![a.clone(), b.clone()], Some(1)),
            page(vec![b, c], None),
        ]);
        let mut loader = FeedLoader::with_page_size(source, 2);

        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(2));
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(1));

        let ids: Vec<Uuid> = loader.items().iter().map(|r| r.id).collect();
        let unique: HashSet<Uuid> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(unique.len(), 3);
        assert!(!loader.has_more());
    }

    #[tokio::test]
    async fn test_order_is_preserved_across_pages() {
        // T3 newest, delivered as a page of two then a page of one.
        let t3 = rec("t3");
        let t2 = rec("t2");
        let t1 = rec("t1");
        let source = ScriptedSource::new(vec![
            page(vec![t3.clone(), t2.clone()], Some(1)),
            page(vec![t1.clone()], None),
        ]);
        let mut loader = FeedLoader::with_page_size(source, 2);

        loader.load_more().await.unwrap();
        loader.load_more().await.unwrap();

        let labels: Vec<&str> = loader.items().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn test_load_after_exhaustion_is_a_noop() {
        let source = ScriptedSource::new(vec![page(vec![rec("a")], None)]);
        let mut loader = FeedLoader::new(source);

        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(1));
        assert!(!loader.has_more());

        // No pages remain in the script; a fetch here would panic.
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(loader.items().len(), 1);
    }

    #[tokio::test]
    async fn test_load_while_loading_is_a_noop() {
        let source = ScriptedSource::new(vec![page(vec![rec("a")], None)]);
        let mut loader = FeedLoader::new(source);
        loader.is_loading = true;

        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Skipped);
        assert!(loader.items().is_empty());
        assert_eq!(loader.source.remaining(), 1, "no fetch may be issued");
    }

    /// Stalls forever on its first fetch, then serves one final page.
    /// Records the cursor of every fetch it receives.
    struct StallOnceSource {
        calls: AtomicUsize,
        seen_cursors: Mutex<Vec<Option<u32>>>,
    }

    impl StallOnceSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen_cursors: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ItemSource for StallOnceSource {
        type Record = Rec;
        type Cursor = u32;
        type Error = ScriptError;

        async fn fetch_page(
            &self,
            cursor: Option<&u32>,
            _limit: i64,
        ) -> Result<SourcePage<Rec, u32>, ScriptError> {
            self.seen_cursors.lock().unwrap().push(cursor.copied());
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(SourcePage {
                records: vec![rec("late")],
                next_cursor: None,
            })
        }
    }

    #[tokio::test]
    async fn test_dropped_fetch_future_leaves_loader_usable() {
        let mut loader = FeedLoader::new(StallOnceSource::new());
        loader.cursor = Some(7);

        // The first fetch never resolves; the timeout drops the in-flight
        // load_more future mid-fetch, as a view teardown would.
        let timed_out = tokio::time::timeout(Duration::from_millis(20), loader.load_more())
            .await
            .is_err();
        assert!(timed_out);

        // The loader must not be wedged: the loading flag is reset and no
        // state was mutated by the abandoned fetch.
        assert!(!loader.is_loading());
        assert!(loader.has_more());
        assert!(loader.items().is_empty());
        assert_eq!(loader.cursor, Some(7));

        // A later call re-attempts from the same cursor and succeeds.
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(1));
        assert_eq!(
            *loader.source.seen_cursors.lock().unwrap(),
            vec![Some(7), Some(7)]
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_state_unchanged_and_retry_works() {
        let a = rec("a");
        let b = rec("b");
        let c = rec("c");
        let source = ScriptedSource::new(vec![
            page(vec![a, b], Some(7)),
            Err(ScriptError),
            page(vec![c], None),
        ]);
        let mut loader = FeedLoader::with_page_size(source, 2);

        loader.load_more().await.unwrap();
        assert_eq!(loader.items().len(), 2);
        assert_eq!(loader.cursor, Some(7));

        loader.load_more().await.unwrap_err();
        // No partial mutation: same items, same cursor, still more data.
        assert_eq!(loader.items().len(), 2);
        assert_eq!(loader.cursor, Some(7));
        assert!(loader.has_more());
        assert!(!loader.is_loading());

        // The loader stays usable; the retry resumes from the same cursor.
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(1));
        assert_eq!(loader.items().len(), 3);
        assert!(!loader.has_more());
    }
}
