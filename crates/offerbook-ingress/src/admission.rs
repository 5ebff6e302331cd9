//! Admission gate: fail-fast load shedding for `book_offers`.
//!
//! The gate reads the scheduler's pending-job count for one job class and
//! rejects the request outright when it is above the threshold. There is no
//! queueing and no retry; a rejected caller must come back later.
//!
//! The count is owned by the scheduler. The gate only reads it.

use std::sync::Arc;

use offerbook_types::{JobClass, OfferbookError, QueryConfig, Result, constants};

/// Read access to the scheduler's pending-work counters.
pub trait JobCounter {
    /// Jobs of `class` that are queued or running.
    fn pending_jobs(&self, class: JobClass) -> usize;
}

impl<T: JobCounter + ?Sized> JobCounter for &T {
    fn pending_jobs(&self, class: JobClass) -> usize {
        (**self).pending_jobs(class)
    }
}

impl<T: JobCounter + ?Sized> JobCounter for Arc<T> {
    fn pending_jobs(&self, class: JobClass) -> usize {
        (**self).pending_jobs(class)
    }
}

/// Rejects requests while too much client work is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionGate {
    threshold: usize,
    job_class: JobClass,
}

impl AdmissionGate {
    /// Gate with the default threshold on the client queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: constants::DEFAULT_ADMISSION_THRESHOLD,
            job_class: JobClass::Client,
        }
    }

    #[must_use]
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            threshold: config.admission_threshold,
            job_class: config.admission_job_class,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Pass if at most `threshold` jobs are pending.
    ///
    /// # Errors
    /// [`OfferbookError::AdmissionRejected`] when the count is above the
    /// threshold.
    pub fn check<J: JobCounter + ?Sized>(&self, jobs: &J) -> Result<()> {
        let pending = jobs.pending_jobs(self.job_class);
        if pending > self.threshold {
            tracing::warn!(
                pending,
                threshold = self.threshold,
                class = ?self.job_class,
                "book_offers shed: too busy"
            );
            return Err(OfferbookError::AdmissionRejected {
                pending,
                threshold: self.threshold,
            });
        }
        Ok(())
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Counter {
        client: usize,
        reads: Cell<usize>,
    }

    impl JobCounter for Counter {
        fn pending_jobs(&self, class: JobClass) -> usize {
            self.reads.set(self.reads.get() + 1);
            match class {
                JobClass::Client => self.client,
                _ => 0,
            }
        }
    }

    fn counter(client: usize) -> Counter {
        Counter {
            client,
            reads: Cell::new(0),
        }
    }

    #[test]
    fn at_threshold_passes() {
        let gate = AdmissionGate::new();
        assert!(gate.check(&counter(200)).is_ok());
        assert!(gate.check(&counter(0)).is_ok());
    }

    #[test]
    fn above_threshold_rejected() {
        let gate = AdmissionGate::new();
        let err = gate.check(&counter(201)).unwrap_err();
        assert!(matches!(
            err,
            OfferbookError::AdmissionRejected {
                pending: 201,
                threshold: 200
            }
        ));
    }

    #[test]
    fn custom_threshold() {
        let gate = AdmissionGate::with_threshold(3);
        assert!(gate.check(&counter(3)).is_ok());
        assert!(gate.check(&counter(4)).is_err());
    }

    #[test]
    fn config_selects_job_class() {
        let config = QueryConfig {
            admission_threshold: 0,
            admission_job_class: JobClass::Peer,
        };
        let gate = AdmissionGate::from_config(&config);
        // Only the client queue is busy; the peer queue is what counts.
        assert!(gate.check(&counter(500)).is_ok());
        assert_eq!(gate.threshold(), 0);
    }

    #[test]
    fn reads_counter_once_through_arc() {
        let shared = Arc::new(counter(10));
        AdmissionGate::new().check(&shared).unwrap();
        assert_eq!(shared.reads.get(), 1);
    }
}
