//! `book_offers` entry point.
//!
//! The service owns explicit handles to its collaborators instead of
//! reaching for process-wide state, so tests can substitute any of them.
//!
//! ```text
//! AdmissionGate.check(jobs) → resolver.resolve(params) → BookOffersRequest::classify(params)
//!     → executor::execute(ledger, source) → BookOffersResponse
//! ```

use offerbook_ingress::{AdmissionGate, BookOffersRequest, JobCounter};
use offerbook_types::{QueryConfig, Result};
use serde_json::Value;

use crate::{
    aggregate::BookOffersResponse,
    context::RequestContext,
    executor,
    ledger::{BookPageSource, LedgerResolver},
};

/// Serves `book_offers` requests against resolved ledger snapshots.
pub struct BookOffersService<R, S, J> {
    resolver: R,
    source: S,
    jobs: J,
    gate: AdmissionGate,
    config: QueryConfig,
}

impl<R, S, J> BookOffersService<R, S, J>
where
    R: LedgerResolver,
    S: BookPageSource<R::Ledger>,
    J: JobCounter,
{
    #[must_use]
    pub fn new(resolver: R, source: S, jobs: J) -> Self {
        Self::with_config(resolver, source, jobs, QueryConfig::default())
    }

    #[must_use]
    pub fn with_config(resolver: R, source: S, jobs: J, config: QueryConfig) -> Self {
        Self {
            resolver,
            source,
            jobs,
            gate: AdmissionGate::from_config(&config),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn jobs(&self) -> &J {
        &self.jobs
    }

    /// Run one request.
    ///
    /// # Errors
    /// Admission and ledger errors come first, then single-pair validation
    /// errors, then anything the page source or cancellation reports.
    pub fn book_offers(
        &self,
        params: &Value,
        ctx: &mut RequestContext,
    ) -> Result<BookOffersResponse> {
        self.gate.check(&self.jobs)?;

        let ledger = self.resolver.resolve(params)?;
        let request = BookOffersRequest::classify(params)?;
        let response = executor::execute(&*ledger, &self.source, &request, ctx)?;

        tracing::info!(
            mode = request.mode(),
            ledger = response.ledger.index,
            pages = response.pages,
            offers = response.offers.len(),
            more = response.marker.is_some(),
            "book_offers served"
        );
        Ok(response)
    }

    /// [`Self::book_offers`] rendered as a response document, errors
    /// included.
    pub fn handle(&self, params: &Value, ctx: &mut RequestContext) -> Value {
        match self.book_offers(params, ctx) {
            Ok(response) => response.to_json(),
            Err(err) => {
                tracing::debug!(error = %err, "book_offers failed");
                err.to_json()
            }
        }
    }
}
