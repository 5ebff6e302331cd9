//! Asset specifications and trading directions.
//!
//! An [`Issue`] names one asset: a currency plus the account that issues it
//! (or the native pair of sentinels). A [`Book`] is an ordered pair of
//! issues: what the taker pays in, and what the taker gets out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, Currency};

/// One asset specification.
///
/// `Ord` orders by currency, then account, which fixes the iteration order
/// of [`crate::OrderBookDirectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize)]
pub struct Issue {
    pub currency: Currency,
    pub account: AccountId,
}

impl Issue {
    #[must_use]
    pub fn new(currency: Currency, account: AccountId) -> Self {
        Self { currency, account }
    }

    /// The native asset with its pseudo-issuer.
    #[must_use]
    pub fn native() -> Self {
        Self {
            currency: Currency::NATIVE,
            account: AccountId::NATIVE_ISSUER,
        }
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        self.currency.is_native()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "{}", self.currency)
        } else {
            write!(f, "{}/{}", self.currency, self.account)
        }
    }
}

/// One trading direction: the taker pays `in_issue` and gets `out_issue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "in")]
    pub in_issue: Issue,
    #[serde(rename = "out")]
    pub out_issue: Issue,
}

impl Book {
    #[must_use]
    pub fn new(in_issue: Issue, out_issue: Issue) -> Self {
        Self {
            in_issue,
            out_issue,
        }
    }

    /// The same pair traded the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            in_issue: self.out_issue,
            out_issue: self.in_issue,
        }
    }

    /// Both sides name the same asset.
    #[must_use]
    pub fn is_self_pair(&self) -> bool {
        self.in_issue == self.out_issue
    }

    /// Whether the leg currencies are `(pays, gets)`, ignoring issuers.
    #[must_use]
    pub fn trades_currencies(&self, pays: &Currency, gets: &Currency) -> bool {
        self.in_issue.currency == *pays && self.out_issue.currency == *gets
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.in_issue, self.out_issue)
    }
}
