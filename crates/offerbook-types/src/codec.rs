//! Identifier codec: text → canonical [`Currency`] / [`AccountId`].
//!
//! Accepted encodings:
//!
//! | kind | forms |
//! |------|-------|
//! | currency | `""` or `"XRP"` (native), three ISO-alphabet characters, 40 hex digits |
//! | account | base58 (ripple alphabet) with `0x00` prefix and double SHA-256 checksum |
//! | issuer | account forms above, or 40 hex digits; never [`AccountId::NO_ACCOUNT`] |
//!
//! Every function here is pure.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{constants, AccountId, Currency};

/// Why an identifier failed to decode or a leg failed its consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unrecognized currency encoding: {0:?}")]
    BadCurrency(String),

    #[error("not a base58 account encoding")]
    BadAccountEncoding,

    #[error("account checksum mismatch")]
    BadChecksum,

    #[error("account type prefix {0:#04x} is not an account")]
    BadAccountPrefix(u8),

    #[error("issuer is the reserved no-account value")]
    ReservedAccount,

    #[error("issuer given for the native currency")]
    UnneededIssuer,

    #[error("native issuer given for a non-native currency")]
    ExpectedNonNativeIssuer,
}

/// Parse a currency code.
pub fn parse_currency(text: &str) -> Result<Currency, CodecError> {
    if text.is_empty() || text == constants::NATIVE_CURRENCY_CODE {
        return Ok(Currency::NATIVE);
    }

    let currency = if text.len() == constants::ISO_CODE_LEN {
        let raw = text.as_bytes();
        if !raw
            .iter()
            .all(|b| constants::ISO_CODE_ALPHABET.as_bytes().contains(b))
        {
            return Err(CodecError::BadCurrency(text.to_string()));
        }
        Currency::from_iso([raw[0], raw[1], raw[2]])
    } else if text.len() == 2 * constants::CURRENCY_BYTES {
        let mut bytes = [0u8; constants::CURRENCY_BYTES];
        hex::decode_to_slice(text, &mut bytes)
            .map_err(|_| CodecError::BadCurrency(text.to_string()))?;
        Currency::from_bytes(bytes)
    } else {
        return Err(CodecError::BadCurrency(text.to_string()));
    };

    // A non-native value spelled like the native code would alias it.
    let native_alias = Currency::from_iso(*b"XRP");
    if currency == native_alias {
        return Err(CodecError::BadCurrency(text.to_string()));
    }
    Ok(currency)
}

/// Parse a base58 account identifier.
pub fn parse_account(text: &str) -> Result<AccountId, CodecError> {
    let decoded = bs58::decode(text)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .map_err(|_| CodecError::BadAccountEncoding)?;

    if decoded.len() != 1 + constants::ACCOUNT_ID_BYTES + constants::CHECKSUM_BYTES {
        return Err(CodecError::BadAccountEncoding);
    }

    let (payload, check) = decoded.split_at(decoded.len() - constants::CHECKSUM_BYTES);
    if checksum(payload).as_slice() != check {
        return Err(CodecError::BadChecksum);
    }
    if payload[0] != constants::ACCOUNT_ID_PREFIX {
        return Err(CodecError::BadAccountPrefix(payload[0]));
    }

    let mut bytes = [0u8; constants::ACCOUNT_ID_BYTES];
    bytes.copy_from_slice(&payload[1..]);
    Ok(AccountId::from_bytes(bytes))
}

/// Parse an issuing account.
///
/// Rejects [`AccountId::NO_ACCOUNT`]: it is reserved for "no taker filter".
pub fn parse_issuer(text: &str) -> Result<AccountId, CodecError> {
    let issuer = if text.len() == 2 * constants::ACCOUNT_ID_BYTES {
        let mut bytes = [0u8; constants::ACCOUNT_ID_BYTES];
        match hex::decode_to_slice(text, &mut bytes) {
            Ok(()) => AccountId::from_bytes(bytes),
            Err(_) => parse_account(text)?,
        }
    } else {
        parse_account(text)?
    };

    if issuer.is_no_account() {
        return Err(CodecError::ReservedAccount);
    }
    Ok(issuer)
}

/// The native currency pairs with the native issuer, and only with it.
pub fn validate_leg(currency: &Currency, issuer: &AccountId) -> Result<(), CodecError> {
    match (currency.is_native(), issuer.is_native_issuer()) {
        (true, false) => Err(CodecError::UnneededIssuer),
        (false, true) => Err(CodecError::ExpectedNonNativeIssuer),
        _ => Ok(()),
    }
}

/// Base58 form of an account identifier.
#[must_use]
pub fn encode_account(id: &AccountId) -> String {
    let mut payload = Vec::with_capacity(1 + constants::ACCOUNT_ID_BYTES + constants::CHECKSUM_BYTES);
    payload.push(constants::ACCOUNT_ID_PREFIX);
    payload.extend_from_slice(id.as_bytes());
    let check = checksum(&payload);
    payload.extend_from_slice(&check);
    bs58::encode(payload)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

fn checksum(payload: &[u8]) -> [u8; constants::CHECKSUM_BYTES] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; constants::CHECKSUM_BYTES];
    out.copy_from_slice(&digest[..constants::CHECKSUM_BYTES]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn native_currency_spellings() {
        assert_eq!(parse_currency("").unwrap(), Currency::NATIVE);
        assert_eq!(parse_currency("XRP").unwrap(), Currency::NATIVE);
        assert_eq!(
            parse_currency("0000000000000000000000000000000000000000").unwrap(),
            Currency::NATIVE
        );
    }

    #[test]
    fn iso_currency_parses_case_insensitively() {
        let upper = parse_currency("USD").unwrap();
        let lower = parse_currency("usd").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.to_string(), "USD");
    }

    #[test]
    fn hex_currency_parses() {
        let cur = parse_currency("0158415500000000C1F76FF6ECB0BAC600000000").unwrap();
        assert!(!cur.is_native());
        assert_eq!(cur.to_string(), "0158415500000000C1F76FF6ECB0BAC600000000");
    }

    #[test]
    fn malformed_currencies_rejected() {
        for bad in ["US", "USDT", "U D", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz", "xrp"] {
            assert!(
                matches!(parse_currency(bad), Err(CodecError::BadCurrency(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn known_account_decodes() {
        let id = parse_account(GENESIS).unwrap();
        assert_eq!(
            hex::encode(id.as_bytes()),
            "b5f762798a53d543a014caf8b297cff8f2f937e8"
        );
        assert_eq!(encode_account(&id), GENESIS);
    }

    #[test]
    fn corrupted_account_rejected() {
        let mut tampered = GENESIS.to_string();
        tampered.pop();
        tampered.push('r');
        assert!(parse_account(&tampered).is_err());
        assert_eq!(parse_account("not-base58!"), Err(CodecError::BadAccountEncoding));
        assert_eq!(parse_account("rHb9CJ"), Err(CodecError::BadAccountEncoding));
    }

    #[test]
    fn random_accounts_survive_encoding() {
        for _ in 0..64 {
            let id = AccountId::random();
            assert_eq!(parse_account(&encode_account(&id)).unwrap(), id);
        }
    }

    #[test]
    fn issuer_accepts_hex_and_base58() {
        let from_b58 = parse_issuer(GENESIS).unwrap();
        let from_hex = parse_issuer("B5F762798A53D543A014CAF8B297CFF8F2F937E8").unwrap();
        assert_eq!(from_b58, from_hex);
    }

    #[test]
    fn issuer_rejects_no_account() {
        assert_eq!(
            parse_issuer("rrrrrrrrrrrrrrrrrrrrBZbvji"),
            Err(CodecError::ReservedAccount)
        );
        assert_eq!(
            parse_issuer("0000000000000000000000000000000000000001"),
            Err(CodecError::ReservedAccount)
        );
    }

    #[test]
    fn native_issuer_parses_as_issuer() {
        let id = parse_issuer("rrrrrrrrrrrrrrrrrrrrrhoLvTp").unwrap();
        assert!(id.is_native_issuer());
    }

    #[test]
    fn leg_consistency() {
        let usd = parse_currency("USD").unwrap();
        let issuer = parse_account(GENESIS).unwrap();

        assert!(validate_leg(&Currency::NATIVE, &AccountId::NATIVE_ISSUER).is_ok());
        assert!(validate_leg(&usd, &issuer).is_ok());
        assert_eq!(
            validate_leg(&Currency::NATIVE, &issuer),
            Err(CodecError::UnneededIssuer)
        );
        assert_eq!(
            validate_leg(&usd, &AccountId::NATIVE_ISSUER),
            Err(CodecError::ExpectedNonNativeIssuer)
        );
    }
}
