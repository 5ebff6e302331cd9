//! Collaborators that own ledger state.
//!
//! The query plane never builds or mutates a ledger. It asks a
//! [`LedgerResolver`] for one immutable snapshot per request and reads
//! every page of that request through a [`BookPageSource`] against the
//! same snapshot, however far the live ledger moves in the meantime.

use std::sync::Arc;

use offerbook_types::{LedgerInfo, OfferPage, OrderBookDirectory, PageRequest, Result};
use serde_json::Value;

/// Read-only view of one published ledger snapshot.
pub trait LedgerView {
    fn info(&self) -> LedgerInfo;

    /// Books discoverable in this snapshot.
    fn order_book_directory(&self) -> &OrderBookDirectory;
}

impl<T: LedgerView + ?Sized> LedgerView for Arc<T> {
    fn info(&self) -> LedgerInfo {
        (**self).info()
    }

    fn order_book_directory(&self) -> &OrderBookDirectory {
        (**self).order_book_directory()
    }
}

/// Picks the snapshot a request reads (`ledger_index`, `ledger_hash`, ...).
pub trait LedgerResolver {
    type Ledger: LedgerView;

    /// # Errors
    /// [`offerbook_types::OfferbookError::LedgerUnavailable`] when no
    /// snapshot matches `params`.
    fn resolve(&self, params: &Value) -> Result<Arc<Self::Ledger>>;
}

/// The offer-index walk: one page of one book.
pub trait BookPageSource<L: ?Sized> {
    /// Fetch offers of `request.book`, starting after `request.marker`.
    fn fetch_page(&self, ledger: &L, request: &PageRequest) -> Result<OfferPage>;
}

impl<L: ?Sized, T: BookPageSource<L> + ?Sized> BookPageSource<L> for &T {
    fn fetch_page(&self, ledger: &L, request: &PageRequest) -> Result<OfferPage> {
        (**self).fetch_page(ledger, request)
    }
}

impl<L: ?Sized, T: BookPageSource<L> + ?Sized> BookPageSource<L> for Arc<T> {
    fn fetch_page(&self, ledger: &L, request: &PageRequest) -> Result<OfferPage> {
        (**self).fetch_page(ledger, request)
    }
}
