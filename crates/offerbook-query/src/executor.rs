//! Mode executors: turn a classified request into page fetches.
//!
//! | mode | fetches | marker |
//! |------|---------|--------|
//! | single | one, with the caller's taker / proof / marker | returned to caller |
//! | cross product | one per matching directory book (per matching currency pair) | none |
//! | batch | two per tuple, forward then reverse | none |
//!
//! List modes always start each book from its first offer, with no taker
//! filter and no proof, and check for cancellation before every fetch.
//! Fetches are strictly sequential; aggregate order is fetch order.

use offerbook_ingress::{BatchRequest, BookOffersRequest, CrossProductRequest, PairRequest};
use offerbook_types::{Book, Limit, PageRequest, Result};

use crate::{
    aggregate::{BookOffersResponse, OfferAggregator},
    context::{LoadType, RequestContext},
    ledger::{BookPageSource, LedgerView},
};

/// Run `request` against `ledger`.
pub fn execute<L, S>(
    ledger: &L,
    source: &S,
    request: &BookOffersRequest,
    ctx: &mut RequestContext,
) -> Result<BookOffersResponse>
where
    L: LedgerView + ?Sized,
    S: BookPageSource<L> + ?Sized,
{
    match request {
        BookOffersRequest::Single(pair) => execute_single(ledger, source, pair, ctx),
        BookOffersRequest::CrossProduct(cross) => execute_cross_product(ledger, source, cross, ctx),
        BookOffersRequest::Batch(batch) => execute_batch(ledger, source, batch, ctx),
    }
}

/// One page of one book; the page's marker is the response marker.
///
/// Charges the request [`LoadType::MediumBurden`].
pub fn execute_single<L, S>(
    ledger: &L,
    source: &S,
    request: &PairRequest,
    ctx: &mut RequestContext,
) -> Result<BookOffersResponse>
where
    L: LedgerView + ?Sized,
    S: BookPageSource<L> + ?Sized,
{
    let page = source.fetch_page(ledger, &request.page_request())?;
    ctx.load_type = LoadType::MediumBurden;

    tracing::debug!(
        book = %request.book,
        taker = %request.taker.short(),
        proof = request.proof,
        limit = request.limit.0,
        resumed = request.marker.is_some(),
        offers = page.len(),
        "single book page fetched"
    );

    let mut aggregator = OfferAggregator::new();
    let marker = aggregator.append(page);
    Ok(aggregator.finish(ledger.info(), marker))
}

/// Directory books selected by the currency list, or all of them.
///
/// Outer loop: directory books in iteration order. Inner loop: ordered
/// pairs `(src, dst)` of the currency list, `src == dst` and duplicates
/// included. A book is fetched once per pair it matches.
pub fn execute_cross_product<L, S>(
    ledger: &L,
    source: &S,
    request: &CrossProductRequest,
    ctx: &RequestContext,
) -> Result<BookOffersResponse>
where
    L: LedgerView + ?Sized,
    S: BookPageSource<L> + ?Sized,
{
    tracing::info!(
        currencies = request.currencies.len(),
        dropped = request.dropped,
        all_book = request.all_book,
        "cross product requested"
    );
    let mut aggregator = OfferAggregator::new();

    for book in ledger.order_book_directory().books() {
        if request.all_book {
            fetch_fresh(ledger, source, *book, request.limit, ctx, &mut aggregator)?;
            continue;
        }
        for src in &request.currencies {
            for dst in &request.currencies {
                if book.trades_currencies(src, dst) {
                    fetch_fresh(ledger, source, *book, request.limit, ctx, &mut aggregator)?;
                }
            }
        }
    }

    Ok(aggregator.finish(ledger.info(), None))
}

/// Each tuple's book, then the same book reversed.
pub fn execute_batch<L, S>(
    ledger: &L,
    source: &S,
    request: &BatchRequest,
    ctx: &RequestContext,
) -> Result<BookOffersResponse>
where
    L: LedgerView + ?Sized,
    S: BookPageSource<L> + ?Sized,
{
    let mut aggregator = OfferAggregator::new();

    for book in &request.books {
        if book.is_self_pair() {
            tracing::warn!(book = %book, "batch entry trades an asset against itself");
        }
        fetch_fresh(ledger, source, *book, request.limit, ctx, &mut aggregator)?;
        fetch_fresh(ledger, source, book.reversed(), request.limit, ctx, &mut aggregator)?;
    }

    Ok(aggregator.finish(ledger.info(), None))
}

/// Unfiltered first page of `book`, appended to `aggregator`.
fn fetch_fresh<L, S>(
    ledger: &L,
    source: &S,
    book: Book,
    limit: Limit,
    ctx: &RequestContext,
    aggregator: &mut OfferAggregator,
) -> Result<()>
where
    L: LedgerView + ?Sized,
    S: BookPageSource<L> + ?Sized,
{
    ctx.ensure_active()?;
    let page = source.fetch_page(ledger, &PageRequest::unfiltered(book, limit))?;
    tracing::debug!(book = %book, offers = page.len(), "book page fetched");
    aggregator.extend(page);
    Ok(())
}
