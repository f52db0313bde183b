//! Pagination handling.
//!
//! Listing operations return results across pages linked by an opaque
//! continuation token. [`PageIterator`] walks pages one at a time and
//! [`aggregate`] drains every page into a single [`AggregatedResult`]:
//! items are appended in arrival order (duplicates kept), summable counters
//! are added up and last-page fields are overwritten.
//!
//! Pages are fetched strictly in sequence since the token for page `n + 1` is
//! only known once page `n` has arrived. There is no page or time limit; the
//! loop ends exactly when a page comes back without a token. A failure on any
//! page drops everything accumulated so far.

mod operation;

pub use operation::{OperationPaginator, TokenSpec};

use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;
use std::ops::AddAssign;
use tracing::trace;

/// An opaque continuation token.
pub trait ContinuationToken: Clone {
    /// True if the token marks the end of the listing.
    fn is_exhausted(&self) -> bool;
}

impl ContinuationToken for String {
    fn is_exhausted(&self) -> bool {
        self.is_empty()
    }
}

impl ContinuationToken for Value {
    fn is_exhausted(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

/// Per-page metadata that can be folded across pages.
pub trait PageMetadata: Default {
    /// Fold the next page's metadata into the running value.
    fn absorb(&mut self, next: Self);
}

impl PageMetadata for () {
    fn absorb(&mut self, _next: Self) {}
}

/// A counter summed across pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Summed<N>(pub N);

impl<N: Copy> Summed<N> {
    /// The running total.
    pub fn get(&self) -> N {
        self.0
    }
}

impl<N: Default + AddAssign> PageMetadata for Summed<N> {
    fn absorb(&mut self, next: Self) {
        self.0 += next.0;
    }
}

/// A field that only reflects the last page processed.
///
/// A page that omits the field clears the previous value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LastPage<T>(pub Option<T>);

impl<T> LastPage<T> {
    /// The value reported by the last page, if any.
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for LastPage<T> {
    fn default() -> Self {
        LastPage(None)
    }
}

impl<T> PageMetadata for LastPage<T> {
    fn absorb(&mut self, next: Self) {
        self.0 = next.0;
    }
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct Page<T, M = (), K = String> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Token for the next page; `None` or an exhausted token ends the listing.
    pub next_token: Option<K>,
    /// Scalar metadata reported with this page.
    pub metadata: M,
}

impl<T, M: Default, K> Page<T, M, K> {
    /// Creates a page with default metadata.
    pub fn new(items: Vec<T>, next_token: Option<K>) -> Self {
        Self {
            items,
            next_token,
            metadata: M::default(),
        }
    }
}

impl<T, M, K: ContinuationToken> Page<T, M, K> {
    /// Replace the metadata.
    pub fn with_metadata<N>(self, metadata: N) -> Page<T, N, K> {
        Page {
            items: self.items,
            next_token: self.next_token,
            metadata,
        }
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.next_token
            .as_ref()
            .is_some_and(|token| !token.is_exhausted())
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the items in this page to a different type.
    pub fn map<U, F>(self, f: F) -> Page<U, M, K>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_token: self.next_token,
            metadata: self.metadata,
        }
    }
}

/// Every page of a listing folded into one result.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult<T, M = ()> {
    /// Items in page arrival order, then intra-page order.
    pub items: Vec<T>,
    /// Metadata folded across pages.
    pub metadata: M,
    /// Number of pages fetched.
    pub pages: usize,
}

impl<T, M: PageMetadata> Default for AggregatedResult<T, M> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            metadata: M::default(),
            pages: 0,
        }
    }
}

impl<T, M: PageMetadata> AggregatedResult<T, M> {
    /// Fold one more page into the result.
    pub fn push_page<K>(&mut self, page: Page<T, M, K>) {
        self.items.extend(page.items);
        self.metadata.absorb(page.metadata);
        self.pages += 1;
    }
}

impl<T, M> AggregatedResult<T, M> {
    /// Number of items across all pages.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no page had items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop the metadata and keep the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Iterator over all pages.
///
/// Starts with no token and stops after the first page whose token is absent
/// or exhausted.
pub struct PageIterator<T, M, K, E, F, Fut>
where
    F: FnMut(Option<K>) -> Fut,
    Fut: Future<Output = Result<Page<T, M, K>, E>>,
{
    fetch_fn: F,
    next_token: Option<K>,
    done: bool,
    pages: usize,
    _marker: PhantomData<fn() -> (T, M, E)>,
}

impl<T, M, K, E, F, Fut> PageIterator<T, M, K, E, F, Fut>
where
    K: ContinuationToken,
    F: FnMut(Option<K>) -> Fut,
    Fut: Future<Output = Result<Page<T, M, K>, E>>,
{
    /// Creates a new page iterator.
    pub fn new(fetch_fn: F) -> Self {
        Self {
            fetch_fn,
            next_token: None,
            done: false,
            pages: 0,
            _marker: PhantomData,
        }
    }

    /// Fetches the next page of results.
    pub async fn next_page(&mut self) -> Result<Option<Page<T, M, K>>, E> {
        if self.done {
            return Ok(None);
        }

        let page = (self.fetch_fn)(self.next_token.take()).await?;
        self.pages += 1;

        if page.has_next() {
            self.next_token = page.next_token.clone();
        } else {
            self.done = true;
        }

        trace!(
            page = self.pages,
            items = page.items.len(),
            more = !self.done,
            "Fetched page"
        );

        Ok(Some(page))
    }

    /// Returns true if there are more pages to fetch.
    pub fn has_next(&self) -> bool {
        !self.done
    }

    /// Number of pages fetched so far.
    pub fn pages(&self) -> usize {
        self.pages
    }
}

/// Drain every page and fold them into one result.
///
/// The first failing page aborts the whole aggregation.
pub async fn aggregate<T, M, K, E, F, Fut>(fetch_fn: F) -> Result<AggregatedResult<T, M>, E>
where
    M: PageMetadata,
    K: ContinuationToken,
    F: FnMut(Option<K>) -> Fut,
    Fut: Future<Output = Result<Page<T, M, K>, E>>,
{
    let mut iterator = PageIterator::new(fetch_fn);
    let mut result = AggregatedResult::default();

    while let Some(page) = iterator.next_page().await? {
        result.push_page(page);
    }

    Ok(result)
}

/// Drain every page and keep only the items.
pub async fn collect_all<T, M, K, E, F, Fut>(fetch_fn: F) -> Result<Vec<T>, E>
where
    M: PageMetadata,
    K: ContinuationToken,
    F: FnMut(Option<K>) -> Fut,
    Fut: Future<Output = Result<Page<T, M, K>, E>>,
{
    aggregate(fetch_fn).await.map(AggregatedResult::into_items)
}
