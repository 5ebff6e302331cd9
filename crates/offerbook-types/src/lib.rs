//! # offerbook-types
//!
//! Shared types, errors, and configuration for the **offerbook** order-book
//! query subsystem.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`Currency`], [`AccountId`] and their sentinels
//! - **Codec**: [`codec::parse_currency`], [`codec::parse_issuer`], [`codec::validate_leg`]
//! - **Book model**: [`Issue`], [`Book`]
//! - **Page model**: [`Limit`], [`Marker`], [`Offer`], [`OfferPage`], [`PageRequest`]
//! - **Ledger views**: [`LedgerInfo`], [`OrderBookDirectory`]
//! - **Configuration**: [`QueryConfig`], [`JobClass`]
//! - **Errors**: [`OfferbookError`] with `OB_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod book;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod offer;

pub use book::*;
pub use codec::CodecError;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use offer::*;

// Constants and codec functions are accessed through their modules
// (`offerbook_types::constants::FOO`, `offerbook_types::codec::parse_currency`).
