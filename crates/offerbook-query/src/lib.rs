//! # offerbook-query
//!
//! **Query plane for `book_offers`.** Reads one immutable ledger snapshot and
//! turns a classified request into page fetches against it.
//!
//! - **Collaborators**: [`LedgerResolver`], [`LedgerView`], [`BookPageSource`]
//! - **Executors**: single pair, cross product, batch ([`executor`])
//! - **Aggregation**: [`OfferAggregator`] → [`BookOffersResponse`]
//! - **Entry point**: [`BookOffersService`]
//!
//! No fan-out runs in parallel: every page of a request is fetched in turn
//! against the same snapshot, and the response lists offers in fetch order.

pub mod aggregate;
pub mod context;
pub mod executor;
pub mod ledger;
pub mod service;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use aggregate::{BookOffersResponse, OfferAggregator};
pub use context::{LoadType, RequestContext};
pub use executor::execute;
pub use ledger::{BookPageSource, LedgerResolver, LedgerView};
pub use service::BookOffersService;
