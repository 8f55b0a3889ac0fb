//! Port abstraction for status persistence adapters.
//!
//! Comments live inside their status document, so comment mutations are
//! single-document updates on this port.
use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Status, StatusId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by status repository adapters.
    pub enum StatusPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "status repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "status repository query failed: {message}",
        /// A unique constraint was violated.
        Duplicate { field: String } => "status {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn create(&self, status: &Status) -> Result<(), StatusPersistenceError>;

    /// List statuses, optionally only those owned by `owner`.
    async fn list(&self, owner: Option<Username>) -> Result<Vec<Status>, StatusPersistenceError>;

    async fn find_by_id(&self, id: &StatusId) -> Result<Option<Status>, StatusPersistenceError>;

    /// Replace the status text; `None` when no status has this id.
    async fn update_text(
        &self,
        id: &StatusId,
        text: &str,
    ) -> Result<Option<Status>, StatusPersistenceError>;

    /// Append a comment and return the updated status.
    async fn push_comment(
        &self,
        id: &StatusId,
        comment: &Comment,
    ) -> Result<Option<Status>, StatusPersistenceError>;

    /// Remove a comment by id and return the updated status. Removing an
    /// unknown comment leaves the status unchanged.
    async fn pull_comment(
        &self,
        id: &StatusId,
        comment_id: &CommentId,
    ) -> Result<Option<Status>, StatusPersistenceError>;
}
