//! Error types for the offerbook query subsystem.
//!
//! All errors use the `OB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Admission / ledger errors
//! - 2xx: Request field errors
//! - 3xx: Identifier errors
//! - 4xx: Market errors
//! - 9xx: General / internal errors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::codec::CodecError;

/// Which side of a single-pair request an identifier error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leg {
    TakerPays,
    TakerGets,
}

impl Leg {
    /// Request field holding this leg.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::TakerPays => "taker_pays",
            Self::TakerGets => "taker_gets",
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Central error enum for all offerbook operations.
#[derive(Debug, Error)]
pub enum OfferbookError {
    // =================================================================
    // Admission / Ledger Errors (1xx)
    // =================================================================
    /// Too many client jobs are already queued.
    #[error("OB_ERR_100: Server too busy: {pending} pending jobs, threshold {threshold}")]
    AdmissionRejected { pending: usize, threshold: usize },

    /// No ledger snapshot matches the request.
    #[error("OB_ERR_101: Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// The caller abandoned the request between page fetches.
    #[error("OB_ERR_102: Request cancelled")]
    RequestCancelled,

    // =================================================================
    // Request Field Errors (2xx)
    // =================================================================
    #[error("OB_ERR_200: Missing field '{0}'")]
    FieldMissing(String),

    #[error("OB_ERR_201: Invalid field '{field}', not {expected}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("OB_ERR_202: Invalid field '{0}'")]
    FieldInvalid(String),

    // =================================================================
    // Identifier Errors (3xx)
    // =================================================================
    #[error("OB_ERR_300: Invalid field '{0}.currency', bad currency")]
    CurrencyMalformed(Leg),

    #[error("OB_ERR_301: Invalid field '{leg}.issuer': {reason}")]
    IssuerMalformed { leg: Leg, reason: CodecError },

    // =================================================================
    // Market Errors (4xx)
    // =================================================================
    /// `taker_pays` and `taker_gets` name the same asset.
    #[error("OB_ERR_400: No such market: taker_gets same as taker_pays")]
    SelfPairRejected,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    #[error("OB_ERR_900: Internal error: {0}")]
    Internal(String),
}

impl OfferbookError {
    /// Numeric code, the digits after `OB_ERR_`.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::AdmissionRejected { .. } => 100,
            Self::LedgerUnavailable(_) => 101,
            Self::RequestCancelled => 102,
            Self::FieldMissing(_) => 200,
            Self::FieldTypeMismatch { .. } => 201,
            Self::FieldInvalid(_) => 202,
            Self::CurrencyMalformed(_) => 300,
            Self::IssuerMalformed { .. } => 301,
            Self::SelfPairRejected => 400,
            Self::Internal(_) => 900,
        }
    }

    /// RPC error token reported to the caller.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::AdmissionRejected { .. } => "tooBusy",
            Self::LedgerUnavailable(_) => "lgrNotFound",
            Self::RequestCancelled => "cancelled",
            Self::FieldMissing(_) | Self::FieldTypeMismatch { .. } | Self::FieldInvalid(_) => {
                "invalidParams"
            }
            Self::CurrencyMalformed(Leg::TakerPays) => "srcCurMalformed",
            Self::CurrencyMalformed(Leg::TakerGets) => "dstAmtMalformed",
            Self::IssuerMalformed {
                leg: Leg::TakerPays,
                ..
            } => "srcIsrMalformed",
            Self::IssuerMalformed {
                leg: Leg::TakerGets,
                ..
            } => "dstIsrMalformed",
            Self::SelfPairRejected => "badMarket",
            Self::Internal(_) => "internal",
        }
    }

    /// Structured error document returned in place of a result.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "status": "error",
            "error": self.token(),
            "error_code": self.code(),
            "error_message": self.to_string(),
        })
    }

    /// Shorthand for [`Self::FieldTypeMismatch`].
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::FieldTypeMismatch {
            field: field.into(),
            expected,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OfferbookError>;
