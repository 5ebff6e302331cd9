//! System-wide constants for the offerbook query subsystem.

/// Pending client jobs above which `book_offers` requests are shed.
pub const DEFAULT_ADMISSION_THRESHOLD: usize = 200;

/// Width in bytes of a currency code.
pub const CURRENCY_BYTES: usize = 20;

/// Width in bytes of an account identifier.
pub const ACCOUNT_ID_BYTES: usize = 20;

/// Offset of the three ASCII characters inside a standard currency code.
pub const ISO_CODE_OFFSET: usize = 12;

/// Length of a standard (ISO-style) currency code.
pub const ISO_CODE_LEN: usize = 3;

/// Characters accepted in a standard currency code.
pub const ISO_CODE_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<>(){}[]|?!@#$%^&*";

/// Textual code of the ledger's native asset.
pub const NATIVE_CURRENCY_CODE: &str = "XRP";

/// Type prefix byte of an encoded account identifier.
pub const ACCOUNT_ID_PREFIX: u8 = 0x00;

/// Length of the base58 checksum suffix.
pub const CHECKSUM_BYTES: usize = 4;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "offerbook";
