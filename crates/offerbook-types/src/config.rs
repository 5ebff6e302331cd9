//! Configuration for the `book_offers` query path.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Scheduler queue whose depth drives admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobClass {
    /// Client RPC and websocket requests.
    #[default]
    Client,
    /// Peer-originated work.
    Peer,
    /// Ledger publication and acquisition.
    Ledger,
}

/// Tunables for the order-book query subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Requests are shed while more than this many jobs are pending.
    pub admission_threshold: usize,
    /// Queue consulted by the admission gate.
    pub admission_job_class: JobClass,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            admission_threshold: constants::DEFAULT_ADMISSION_THRESHOLD,
            admission_job_class: JobClass::Client,
        }
    }
}
