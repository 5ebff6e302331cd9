//! Fixed-width ledger identifiers: [`Currency`] and [`AccountId`].
//!
//! Both are 160-bit values. Each has reserved values that carry meaning
//! beyond "some asset" / "some account":
//!
//! - [`Currency::NATIVE`] is the ledger's intrinsic asset (all zero bytes).
//! - [`AccountId::NATIVE_ISSUER`] is the pseudo-issuer of the native asset.
//! - [`AccountId::NO_ACCOUNT`] means "no account", used for "do not filter
//!   by taker". It is never a valid issuer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{codec, constants};

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// A 160-bit currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Currency(pub [u8; constants::CURRENCY_BYTES]);

impl Currency {
    /// The native asset.
    pub const NATIVE: Self = Self([0u8; constants::CURRENCY_BYTES]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; constants::CURRENCY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Build a standard code from three ASCII characters, upper-casing them.
    ///
    /// No alphabet check is done here; see [`codec::parse_currency`].
    #[must_use]
    pub fn from_iso(code: [u8; constants::ISO_CODE_LEN]) -> Self {
        let mut bytes = [0u8; constants::CURRENCY_BYTES];
        for (slot, ch) in bytes[constants::ISO_CODE_OFFSET..]
            .iter_mut()
            .zip(code.iter())
        {
            *slot = ch.to_ascii_uppercase();
        }
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; constants::CURRENCY_BYTES] {
        &self.0
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }

    /// The three-character code, if this is a printable standard code.
    #[must_use]
    pub fn iso_code(&self) -> Option<&str> {
        let iso_end = constants::ISO_CODE_OFFSET + constants::ISO_CODE_LEN;
        let padding_is_zero = self.0[..constants::ISO_CODE_OFFSET]
            .iter()
            .chain(self.0[iso_end..].iter())
            .all(|b| *b == 0);
        if !padding_is_zero {
            return None;
        }
        let code = &self.0[constants::ISO_CODE_OFFSET..iso_end];
        if !code
            .iter()
            .all(|b| constants::ISO_CODE_ALPHABET.as_bytes().contains(b))
        {
            return None;
        }
        std::str::from_utf8(code).ok()
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::NATIVE
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return f.write_str(constants::NATIVE_CURRENCY_CODE);
        }
        match self.iso_code() {
            Some(code) => f.write_str(code),
            None => f.write_str(&hex::encode_upper(self.0)),
        }
    }
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A 160-bit account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; constants::ACCOUNT_ID_BYTES]);

impl AccountId {
    /// Pseudo-issuer of the native asset.
    pub const NATIVE_ISSUER: Self = Self([0u8; constants::ACCOUNT_ID_BYTES]);

    /// Reserved "no account" value; also the "no taker filter" sentinel.
    pub const NO_ACCOUNT: Self = {
        let mut bytes = [0u8; constants::ACCOUNT_ID_BYTES];
        bytes[constants::ACCOUNT_ID_BYTES - 1] = 1;
        Self(bytes)
    };

    #[must_use]
    pub fn from_bytes(bytes: [u8; constants::ACCOUNT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; constants::ACCOUNT_ID_BYTES] {
        &self.0
    }

    #[must_use]
    pub fn is_native_issuer(&self) -> bool {
        *self == Self::NATIVE_ISSUER
    }

    #[must_use]
    pub fn is_no_account(&self) -> bool {
        *self == Self::NO_ACCOUNT
    }

    /// First four bytes as hex, for compact log fields.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::NATIVE_ISSUER
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode_account(self))
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl AccountId {
    /// A random account that is neither sentinel.
    #[must_use]
    pub fn random() -> Self {
        use rand::Rng;
        loop {
            let mut bytes = [0u8; constants::ACCOUNT_ID_BYTES];
            rand::thread_rng().fill(&mut bytes[..]);
            let id = Self(bytes);
            if !id.is_native_issuer() && !id.is_no_account() {
                return id;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
