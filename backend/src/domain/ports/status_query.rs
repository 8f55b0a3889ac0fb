//! Driving port for status reads.

use async_trait::async_trait;

use crate::domain::{Error, Status};

/// Domain use-case port for status reads. No session is required.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    /// All statuses, or only those owned by `username`. A blank filter lists
    /// everything.
    async fn statuses(&self, username: Option<&str>) -> Result<Vec<Status>, Error>;
}
