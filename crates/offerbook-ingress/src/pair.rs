//! Strict validation of a single-pair `book_offers` request.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! ```text
//! taker_pays / taker_gets present, objects
//!   → *.currency present, strings → currencies parse
//!   → taker_pays.issuer (parse, leg consistency) → taker_gets.issuer (same)
//!   → taker → pays != gets → limit → proof / marker
//! ```

use offerbook_types::{
    AccountId, Book, Currency, Issue, Leg, Limit, Marker, OfferbookError, PageRequest, Result,
    codec,
};
use serde_json::{Map, Value};

use crate::fields;

/// A fully validated single-pair request.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRequest {
    pub book: Book,
    /// [`AccountId::NO_ACCOUNT`] unless the caller named a taker.
    pub taker: AccountId,
    pub proof: bool,
    pub limit: Limit,
    /// Forwarded to the page fetch as given.
    pub marker: Option<Marker>,
}

impl PairRequest {
    /// Arguments for the one page fetch this request makes.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            book: self.book,
            taker: self.taker,
            proof: self.proof,
            limit: self.limit,
            marker: self.marker.clone(),
        }
    }
}

/// Validate `params` as a single-pair request.
///
/// # Errors
/// The first failing check's error; see the module docs for the order.
pub fn validate_pair(params: &Value) -> Result<PairRequest> {
    for leg in [Leg::TakerPays, Leg::TakerGets] {
        if !fields::is_present(params, leg.field()) {
            return Err(OfferbookError::FieldMissing(leg.field().to_string()));
        }
    }
    let taker_pays = fields::require_object(params, Leg::TakerPays.field())?;
    let taker_gets = fields::require_object(params, Leg::TakerGets.field())?;

    let pays_code = fields::require_string(taker_pays, "currency", "taker_pays.currency")?;
    let gets_code = fields::require_string(taker_gets, "currency", "taker_gets.currency")?;

    let pays_currency = parse_leg_currency(pays_code, Leg::TakerPays)?;
    let gets_currency = parse_leg_currency(gets_code, Leg::TakerGets)?;

    let pays_issuer = parse_leg_issuer(taker_pays, &pays_currency, Leg::TakerPays)?;
    let gets_issuer = parse_leg_issuer(taker_gets, &gets_currency, Leg::TakerGets)?;

    let taker = parse_taker(params)?;

    let book = Book::new(
        Issue::new(pays_currency, pays_issuer),
        Issue::new(gets_currency, gets_issuer),
    );
    if book.is_self_pair() {
        tracing::info!(book = %book, "taker_gets same as taker_pays");
        return Err(OfferbookError::SelfPairRejected);
    }

    let limit = fields::strict_limit(params)?;
    let proof = fields::is_present(params, "proof");
    let marker = params
        .get("marker")
        .filter(|m| !m.is_null())
        .cloned()
        .map(Marker);

    Ok(PairRequest {
        book,
        taker,
        proof,
        limit,
        marker,
    })
}

fn parse_leg_currency(code: &str, leg: Leg) -> Result<Currency> {
    codec::parse_currency(code).map_err(|err| {
        tracing::info!(leg = %leg, error = %err, "bad currency");
        OfferbookError::CurrencyMalformed(leg)
    })
}

/// Issuer of one leg, defaulting to the native issuer, checked against the
/// leg's currency.
fn parse_leg_issuer(obj: &Map<String, Value>, currency: &Currency, leg: Leg) -> Result<AccountId> {
    let path = format!("{}.issuer", leg.field());
    let issuer = match fields::optional_string(obj, "issuer", &path)? {
        Some(text) => codec::parse_issuer(text)
            .map_err(|reason| OfferbookError::IssuerMalformed { leg, reason })?,
        None => AccountId::NATIVE_ISSUER,
    };
    codec::validate_leg(currency, &issuer)
        .map_err(|reason| OfferbookError::IssuerMalformed { leg, reason })?;
    Ok(issuer)
}

fn parse_taker(params: &Value) -> Result<AccountId> {
    let Some(value) = params.get("taker") else {
        return Ok(AccountId::NO_ACCOUNT);
    };
    let text = value
        .as_str()
        .ok_or_else(|| OfferbookError::type_mismatch("taker", "string"))?;
    codec::parse_account(text).map_err(|_| OfferbookError::FieldInvalid("taker".to_string()))
}
