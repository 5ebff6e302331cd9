//! # offerbook-ingress
//!
//! **Request envelope** for `book_offers`: everything that happens before
//! the ledger is read.
//!
//! ## Architecture
//!
//! 1. **AdmissionGate**: sheds the request when too many client jobs are pending
//! 2. **BookOffersRequest::classify**: picks exactly one of three modes from field presence
//! 3. **validate_pair**: strict, fail-fast validation of a single-pair request
//!
//! ## Request Flow
//!
//! ```text
//! AdmissionGate.check() → (ledger resolved by caller) → BookOffersRequest::classify()
//!     → Single(PairRequest) | CrossProduct(..) | Batch(..)
//! ```
//!
//! Single-pair requests are validated under [`ValidationPolicy::Strict`];
//! list modes parse their elements under [`ValidationPolicy::Lenient`].

pub mod admission;
pub mod classifier;
mod fields;
pub mod pair;

pub use admission::{AdmissionGate, JobCounter};
pub use classifier::{BatchRequest, BookOffersRequest, CrossProductRequest, ValidationPolicy};
pub use pair::{PairRequest, validate_pair};
