//! Per-request accounting and cancellation.

use offerbook_types::{OfferbookError, Result};
use tokio_util::sync::CancellationToken;

/// Resource cost charged to the caller once the request finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadType {
    /// Baseline charge for any RPC.
    #[default]
    Reference,
    /// Charged for a single-pair page walk.
    MediumBurden,
}

/// State the surrounding RPC layer threads through one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub load_type: LoadType,
    cancel: CancellationToken,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context observing `cancel`, typically a `child_token()` of the
    /// connection's token.
    #[must_use]
    pub fn with_cancel(cancel: CancellationToken) -> Self {
        Self {
            load_type: LoadType::default(),
            cancel,
        }
    }

    /// Handle for cancelling this request from elsewhere.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// # Errors
    /// [`OfferbookError::RequestCancelled`] once the token is cancelled.
    pub fn ensure_active(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(OfferbookError::RequestCancelled);
        }
        Ok(())
    }
}
