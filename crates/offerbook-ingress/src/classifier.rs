//! Request classification: one `book_offers` document, exactly one mode.
//!
//! Field presence decides the mode, in fixed priority:
//!
//! 1. `currencies` → [`BookOffersRequest::CrossProduct`]
//! 2. `map_pays` → [`BookOffersRequest::Batch`]
//! 3. otherwise → [`BookOffersRequest::Single`], validated strictly
//!
//! When both list fields are present `currencies` wins and `map_pays` is
//! ignored.
//!
//! The list modes parse their elements under [`ValidationPolicy::Lenient`]:
//! a malformed currency is dropped, a malformed tuple element falls back to
//! the native default. Neither aborts the request.

use offerbook_types::{AccountId, Book, Currency, Issue, Limit, Result, codec};
use serde_json::Value;

use crate::{
    fields,
    pair::{PairRequest, validate_pair},
};

/// How malformed input is treated in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationPolicy {
    /// First malformed field ends the request with an error.
    Strict,
    /// Malformed list elements are skipped or defaulted.
    Lenient,
}

/// Cross product of a currency list against the book directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossProductRequest {
    /// Parsed currencies in request order; duplicates kept.
    pub currencies: Vec<Currency>,
    /// Walk every directory book, ignoring `currencies`.
    pub all_book: bool,
    pub limit: Limit,
    /// Entries of the `currencies` list that did not parse.
    pub dropped: usize,
}

/// Explicit list of pairs, each walked forward then reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// Forward books in request order.
    pub books: Vec<Book>,
    pub limit: Limit,
}

/// A classified `book_offers` request.
#[derive(Debug, Clone, PartialEq)]
pub enum BookOffersRequest {
    Single(PairRequest),
    CrossProduct(CrossProductRequest),
    Batch(BatchRequest),
}

impl BookOffersRequest {
    /// Pick the mode for `params` and parse its payload.
    ///
    /// # Errors
    /// Only single-pair requests can fail here; see
    /// [`crate::pair::validate_pair`].
    pub fn classify(params: &Value) -> Result<Self> {
        if fields::is_present(params, "currencies") {
            if fields::is_present(params, "map_pays") {
                tracing::debug!("both currencies and map_pays given, map_pays ignored");
            }
            return Ok(Self::CrossProduct(parse_cross_product(params)));
        }
        if fields::is_present(params, "map_pays") {
            return Ok(Self::Batch(parse_batch(params)));
        }
        validate_pair(params).map(Self::Single)
    }

    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::CrossProduct(_) => "cross_product",
            Self::Batch(_) => "batch",
        }
    }

    #[must_use]
    pub fn policy(&self) -> ValidationPolicy {
        match self {
            Self::Single(_) => ValidationPolicy::Strict,
            Self::CrossProduct(_) | Self::Batch(_) => ValidationPolicy::Lenient,
        }
    }
}

fn parse_cross_product(params: &Value) -> CrossProductRequest {
    let entries = list_field(params, "currencies");
    let mut currencies = Vec::with_capacity(entries.len());
    let mut dropped = 0;

    for entry in entries {
        match entry.as_str().map(codec::parse_currency) {
            Some(Ok(currency)) => currencies.push(currency),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "currency list entry dropped");
                dropped += 1;
            }
            None => {
                tracing::debug!(entry = %entry, "non-string currency list entry dropped");
                dropped += 1;
            }
        }
    }

    CrossProductRequest {
        currencies,
        all_book: fields::lenient_flag(params, "all_book"),
        limit: fields::lenient_limit(params),
        dropped,
    }
}

fn parse_batch(params: &Value) -> BatchRequest {
    BatchRequest {
        books: list_field(params, "map_pays")
            .iter()
            .map(lenient_book)
            .collect(),
        limit: fields::lenient_limit(params),
    }
}

/// `[paysCurrency, paysIssuer, getsCurrency, getsIssuer]`, extras ignored.
///
/// Missing, non-string and malformed elements take the native default.
fn lenient_book(tuple: &Value) -> Book {
    let element = |i: usize| tuple.get(i).and_then(Value::as_str);
    let currency = |i: usize| {
        element(i)
            .and_then(|text| codec::parse_currency(text).ok())
            .unwrap_or_default()
    };
    let issuer = |i: usize| -> AccountId {
        element(i)
            .and_then(|text| codec::parse_issuer(text).ok())
            .unwrap_or_default()
    };

    Book::new(
        Issue::new(currency(0), issuer(1)),
        Issue::new(currency(2), issuer(3)),
    )
}

/// Array members of `field`, or nothing if it is not an array.
fn list_field<'a>(params: &'a Value, field: &str) -> &'a [Value] {
    params
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use offerbook_types::OfferbookError;
    use serde_json::json;

    use super::*;

    const GW_A: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const GW_B: &str = "rGZQKj1U9fy21xRjrAtYCniUarwxFRrzmi";

    fn usd() -> Currency {
        codec::parse_currency("USD").unwrap()
    }

    fn eur() -> Currency {
        codec::parse_currency("EUR").unwrap()
    }

    #[test]
    fn currencies_selects_cross_product() {
        let req = BookOffersRequest::classify(&json!({
            "currencies": ["USD", "EUR"],
            "all_book": 1,
            "limit": 10,
        }))
        .unwrap();
        assert_eq!(req.mode(), "cross_product");
        assert_eq!(req.policy(), ValidationPolicy::Lenient);
        let BookOffersRequest::CrossProduct(cp) = req else {
            panic!("wrong mode");
        };
        assert_eq!(cp.currencies, vec![usd(), eur()]);
        assert!(cp.all_book);
        assert_eq!(cp.limit, Limit(10));
        assert_eq!(cp.dropped, 0);
    }

    #[test]
    fn currencies_wins_over_map_pays() {
        let req = BookOffersRequest::classify(&json!({
            "currencies": ["USD"],
            "map_pays": [["USD", GW_A, "EUR", GW_B]],
        }))
        .unwrap();
        assert!(matches!(req, BookOffersRequest::CrossProduct(_)));
    }

    #[test]
    fn map_pays_selects_batch() {
        let req = BookOffersRequest::classify(&json!({
            "map_pays": [["USD", GW_A, "EUR", GW_B, "extra"]],
        }))
        .unwrap();
        let BookOffersRequest::Batch(batch) = req else {
            panic!("wrong mode");
        };
        assert_eq!(batch.books.len(), 1);
        let book = batch.books[0];
        assert_eq!(book.in_issue.currency, usd());
        assert_eq!(book.in_issue.account.to_string(), GW_A);
        assert_eq!(book.out_issue.currency, eur());
        assert_eq!(book.out_issue.account.to_string(), GW_B);
        assert_eq!(batch.limit, Limit(0));
    }

    #[test]
    fn no_list_fields_is_single_and_strict() {
        let req = BookOffersRequest::classify(&json!({
            "taker_pays": {"currency": "XRP"},
            "taker_gets": {"currency": "USD", "issuer": GW_A},
        }))
        .unwrap();
        assert_eq!(req.mode(), "single");
        assert_eq!(req.policy(), ValidationPolicy::Strict);
    }

    #[test]
    fn single_mode_missing_leg_is_field_missing() {
        let err = BookOffersRequest::classify(&json!({"limit": 5})).unwrap_err();
        assert!(matches!(err, OfferbookError::FieldMissing(ref f) if f == "taker_pays"));
    }

    #[test]
    fn malformed_currencies_dropped() {
        let req = BookOffersRequest::classify(&json!({
            "currencies": ["USD", "NOT-A-CODE", 42, "EUR", "USD"],
        }))
        .unwrap();
        let BookOffersRequest::CrossProduct(cp) = req else {
            panic!("wrong mode");
        };
        assert_eq!(cp.currencies, vec![usd(), eur(), usd()]);
        assert_eq!(cp.dropped, 2);
        assert!(!cp.all_book);
    }

    #[test]
    fn non_array_lists_are_empty() {
        let req = BookOffersRequest::classify(&json!({"currencies": "USD", "all_book": 1})).unwrap();
        let BookOffersRequest::CrossProduct(cp) = req else {
            panic!("wrong mode");
        };
        assert!(cp.currencies.is_empty());
        assert!(cp.all_book);

        let req = BookOffersRequest::classify(&json!({"map_pays": null})).unwrap();
        assert!(matches!(req, BookOffersRequest::Batch(ref b) if b.books.is_empty()));
    }

    #[test]
    fn short_and_malformed_tuples_default_to_native() {
        let req = BookOffersRequest::classify(&json!({
            "map_pays": [
                ["USD", GW_A],
                ["USD", "bogus", 7, GW_B],
                "not-a-tuple",
            ],
            "limit": "ten",
        }))
        .unwrap();
        let BookOffersRequest::Batch(batch) = req else {
            panic!("wrong mode");
        };
        assert_eq!(batch.books.len(), 3);

        assert_eq!(batch.books[0].in_issue.currency, usd());
        assert_eq!(batch.books[0].out_issue, Issue::native());

        assert!(batch.books[1].in_issue.account.is_native_issuer());
        assert!(batch.books[1].out_issue.currency.is_native());
        assert_eq!(batch.books[1].out_issue.account.to_string(), GW_B);

        assert_eq!(batch.books[2], Book::new(Issue::native(), Issue::native()));
        assert_eq!(batch.limit, Limit(0));
    }
}
