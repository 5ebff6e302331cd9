//! Page-level types exchanged with the offer-index walk.
//!
//! Offers and markers are opaque here: the walk produces them and, for
//! markers, consumes them again on the next page of the same book.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AccountId, Book};

/// Maximum number of offers per page. `0` asks for the server default cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Limit(pub u32);

impl Limit {
    /// Server default cap.
    pub const DEFAULT: Self = Self(0);

    #[must_use]
    pub fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// Opaque continuation token for one book's walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(pub Value);

/// One offer as rendered by the offer-index walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offer(pub Value);

/// One page of a book's offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferPage {
    pub offers: Vec<Offer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl OfferPage {
    #[must_use]
    pub fn new(offers: Vec<Offer>, marker: Option<Marker>) -> Self {
        Self { offers, marker }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

/// Arguments of a single page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub book: Book,
    /// [`AccountId::NO_ACCOUNT`] disables taker filtering.
    pub taker: AccountId,
    pub proof: bool,
    pub limit: Limit,
    pub marker: Option<Marker>,
}

impl PageRequest {
    /// A fresh, unfiltered, proof-less walk of `book` from its first offer.
    #[must_use]
    pub fn unfiltered(book: Book, limit: Limit) -> Self {
        Self {
            book,
            taker: AccountId::NO_ACCOUNT,
            proof: false,
            limit,
            marker: None,
        }
    }
}
