//! In-memory collaborators for tests and local tooling.
//!
//! Enabled by the `test-helpers` feature.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use offerbook_ingress::JobCounter;
use offerbook_types::{
    Book, JobClass, LedgerInfo, Marker, Offer, OfferPage, OfferbookError, OrderBookDirectory,
    PageRequest, Result,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::ledger::{BookPageSource, LedgerResolver, LedgerView};

/// Page size used when a request asks for the default cap.
pub const MEMORY_DEFAULT_CAP: usize = 300;

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    info: LedgerInfo,
    directory: OrderBookDirectory,
}

impl MemoryLedger {
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            info: LedgerInfo {
                index,
                hash: None,
                validated: false,
            },
            directory: OrderBookDirectory::new(),
        }
    }

    #[must_use]
    pub fn with_book(mut self, book: Book) -> Self {
        self.directory.insert(book);
        self
    }

    #[must_use]
    pub fn validated(mut self, hash: [u8; 32]) -> Self {
        self.info.hash = Some(hash);
        self.info.validated = true;
        self
    }
}

impl LedgerView for MemoryLedger {
    fn info(&self) -> LedgerInfo {
        self.info
    }

    fn order_book_directory(&self) -> &OrderBookDirectory {
        &self.directory
    }
}

/// Hands out the same snapshot to every request, or none at all.
#[derive(Debug, Default)]
pub struct FixedResolver {
    ledger: Option<Arc<MemoryLedger>>,
    calls: AtomicUsize,
}

impl FixedResolver {
    #[must_use]
    pub fn new(ledger: MemoryLedger) -> Self {
        Self {
            ledger: Some(Arc::new(ledger)),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LedgerResolver for FixedResolver {
    type Ledger = MemoryLedger;

    fn resolve(&self, _params: &Value) -> Result<Arc<MemoryLedger>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ledger
            .clone()
            .ok_or_else(|| OfferbookError::LedgerUnavailable("ledgerNotFound".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Page source
// ---------------------------------------------------------------------------

/// Offer-index walk over per-book offer lists.
///
/// The marker is the index of the next offer to return. Every request is
/// recorded, including ones that fail.
#[derive(Debug, Default)]
pub struct MemoryPageSource {
    books: HashMap<Book, Vec<Offer>>,
    calls: Mutex<Vec<PageRequest>>,
    fail: bool,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MemoryPageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `count` offers for `book`.
    #[must_use]
    pub fn with_offers(mut self, book: Book, count: usize) -> Self {
        let offers = (0..count)
            .map(|seq| Offer(json!({"book": book.to_string(), "seq": seq})))
            .collect();
        self.books.insert(book, offers);
        self
    }

    /// Every fetch fails after being recorded.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Cancel `token` once `calls` fetches have been served.
    #[must_use]
    pub fn cancel_after(mut self, calls: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((calls, token));
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PageRequest> {
        self.lock_calls().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<PageRequest>> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<L: LedgerView + ?Sized> BookPageSource<L> for MemoryPageSource {
    fn fetch_page(&self, _ledger: &L, request: &PageRequest) -> Result<OfferPage> {
        let served = {
            let mut calls = self.lock_calls();
            calls.push(request.clone());
            calls.len()
        };
        if let Some((after, token)) = &self.cancel_after {
            if served >= *after {
                token.cancel();
            }
        }
        if self.fail {
            return Err(OfferbookError::Internal("page source failure".to_string()));
        }

        let offers = self
            .books
            .get(&request.book)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let start = request
            .marker
            .as_ref()
            .and_then(|m| m.0.as_u64())
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
            .min(offers.len());
        let cap = if request.limit.is_default() {
            MEMORY_DEFAULT_CAP
        } else {
            usize::try_from(request.limit.0).unwrap_or(usize::MAX)
        };
        let end = start.saturating_add(cap).min(offers.len());

        let marker = (end < offers.len()).then(|| Marker(json!(end)));
        Ok(OfferPage::new(offers[start..end].to_vec(), marker))
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Pending-job count that only tests change.
#[derive(Debug, Default)]
pub struct FixedJobCount(AtomicUsize);

impl FixedJobCount {
    #[must_use]
    pub fn new(pending: usize) -> Self {
        Self(AtomicUsize::new(pending))
    }

    pub fn set(&self, pending: usize) {
        self.0.store(pending, Ordering::SeqCst);
    }
}

impl JobCounter for FixedJobCount {
    fn pending_jobs(&self, _class: JobClass) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use offerbook_types::{AccountId, Currency, Issue, Limit};

    use super::*;

    fn book() -> Book {
        Book::new(
            Issue::native(),
            Issue::new(Currency::from_iso(*b"USD"), AccountId::from_bytes([9; 20])),
        )
    }

    #[test]
    fn memory_source_paginates_by_index_marker() {
        let book = book();
        let ledger = MemoryLedger::new(1);
        let source = MemoryPageSource::new().with_offers(book, 5);

        let mut req = PageRequest::unfiltered(book, Limit(2));
        let first = source.fetch_page(&ledger, &req).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.marker, Some(Marker(json!(2))));

        req.marker = first.marker;
        let second = source.fetch_page(&ledger, &req).unwrap();
        assert_eq!(second.offers[0].0["seq"], 2);

        req.marker = Some(Marker(json!(4)));
        let last = source.fetch_page(&ledger, &req).unwrap();
        assert_eq!(last.len(), 1);
        assert!(last.marker.is_none());
        assert_eq!(source.call_count(), 3);
    }

    #[test]
    fn default_limit_uses_cap() {
        let book = book();
        let source = MemoryPageSource::new().with_offers(book, MEMORY_DEFAULT_CAP + 1);
        let page = source
            .fetch_page(&MemoryLedger::new(1), &PageRequest::unfiltered(book, Limit::DEFAULT))
            .unwrap();
        assert_eq!(page.len(), MEMORY_DEFAULT_CAP);
        assert!(page.marker.is_some());
    }

    #[test]
    fn unknown_book_is_empty_page() {
        let book = book();
        let page = MemoryPageSource::new()
            .fetch_page(&MemoryLedger::new(1), &PageRequest::unfiltered(book, Limit(1)))
            .unwrap();
        assert!(page.is_empty());
        assert!(page.marker.is_none());
    }

    #[test]
    fn resolver_counts_calls() {
        let resolver = FixedResolver::unavailable();
        assert!(matches!(
            resolver.resolve(&Value::Null),
            Err(OfferbookError::LedgerUnavailable(_))
        ));
        assert_eq!(resolver.calls(), 1);
    }

    #[test]
    fn job_count_is_adjustable() {
        let jobs = FixedJobCount::new(3);
        assert_eq!(jobs.pending_jobs(JobClass::Client), 3);
        jobs.set(250);
        assert_eq!(jobs.pending_jobs(JobClass::Client), 250);
    }
}
