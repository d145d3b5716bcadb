use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::coords::SiteError;
use crate::elements::ElementSetError;
use crate::propagation::PropagationError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("element set for catalog id {catalog_id} unavailable: {source}")]
    ElementSetUnavailable {
        catalog_id: u32,
        source: ElementSetError,
    },
    #[error("propagation failed for catalog id {catalog_id} at {timestamp}: {source}")]
    Propagation {
        catalog_id: u32,
        timestamp: DateTime<Utc>,
        source: PropagationError,
    },
    #[error("invalid site: {0}")]
    InvalidSite(#[from] SiteError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
