//! Driving port for status and comment mutations.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, SessionUser, Status};

/// `updateStatus` input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status_id: String,
    pub status_text: String,
}

/// `addComment` input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub status_id: String,
    pub comment_text: String,
}

/// `deleteComment` input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub status_id: String,
    pub comment_id: String,
}

/// Domain use-case port for status mutations.
///
/// Operations addressing a status by id resolve to `Ok(None)` when it does
/// not exist.
#[async_trait]
pub trait StatusCommand: Send + Sync {
    /// Set the session user's status, replacing the text of an existing one.
    async fn add_status(
        &self,
        session: Option<&SessionUser>,
        status_text: &str,
    ) -> Result<Status, Error>;

    async fn update_status(
        &self,
        session: Option<&SessionUser>,
        request: UpdateStatusRequest,
    ) -> Result<Option<Status>, Error>;

    async fn add_comment(
        &self,
        session: Option<&SessionUser>,
        request: AddCommentRequest,
    ) -> Result<Option<Status>, Error>;

    async fn delete_comment(
        &self,
        session: Option<&SessionUser>,
        request: DeleteCommentRequest,
    ) -> Result<Option<Status>, Error>;
}
