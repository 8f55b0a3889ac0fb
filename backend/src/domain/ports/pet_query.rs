//! Driving port for pet reads.

use async_trait::async_trait;

use crate::domain::{Error, Pet};

/// Domain use-case port for pet reads. No session is required.
#[async_trait]
pub trait PetQuery: Send + Sync {
    /// All pets, or only those owned by `username`. A blank filter lists
    /// everything.
    async fn pets(&self, username: Option<&str>) -> Result<Vec<Pet>, Error>;
}
