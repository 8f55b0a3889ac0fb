//! Status domain service: status posts and their comments.
//!
//! A user has at most one status. `add_status` therefore upserts by owner:
//! a second call replaces the text of the existing status and keeps its
//! comments.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{
    AddCommentRequest, DeleteCommentRequest, StatusCommand, StatusQuery, StatusRepository,
    UpdateStatusRequest, UserRepository,
};
use super::service_support::{OwnerFilter, map_status_error, map_user_error, parse_id};
use super::{
    Comment, CommentId, CommentText, Error, OwnershipPolicy, SessionUser, Status, StatusId,
    StatusText, TextValidationError, require_session,
};

/// Status service implementing [`StatusCommand`] and [`StatusQuery`].
#[derive(Clone)]
pub struct StatusService<S, U> {
    statuses: Arc<S>,
    users: Arc<U>,
    ownership: OwnershipPolicy,
    clock: Arc<dyn Clock>,
}

impl<S, U> StatusService<S, U> {
    pub fn new(
        statuses: Arc<S>,
        users: Arc<U>,
        ownership: OwnershipPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            statuses,
            users,
            ownership,
            clock,
        }
    }
}

fn invalid_text(err: TextValidationError) -> Error {
    Error::invalid_field(err.field(), err)
}

impl<S, U> StatusService<S, U>
where
    S: StatusRepository,
    U: UserRepository,
{
    async fn find(&self, id: &StatusId) -> Result<Option<Status>, Error> {
        self.statuses.find_by_id(id).await.map_err(map_status_error)
    }

    async fn existing_status_of(&self, session: &SessionUser) -> Result<Option<StatusId>, Error> {
        let user = self
            .users
            .find_by_id(session.id())
            .await
            .map_err(map_user_error)?;
        Ok(user.and_then(|user| user.status_id().copied()))
    }
}

#[async_trait]
impl<S, U> StatusCommand for StatusService<S, U>
where
    S: StatusRepository,
    U: UserRepository,
{
    async fn add_status(
        &self,
        session: Option<&SessionUser>,
        status_text: &str,
    ) -> Result<Status, Error> {
        let session = require_session(session)?;
        let text = StatusText::new(status_text).map_err(invalid_text)?;

        if let Some(existing) = self.existing_status_of(session).await? {
            let updated = self
                .statuses
                .update_text(&existing, text.as_ref())
                .await
                .map_err(map_status_error)?;
            if let Some(status) = updated {
                info!(status_id = %status.id, owner = %status.username, "replaced status text");
                return Ok(status);
            }
        }

        let status = Status::new(
            StatusId::random(),
            text,
            session.username().clone(),
            self.clock.utc(),
        );
        self.statuses
            .create(&status)
            .await
            .map_err(map_status_error)?;
        self.users
            .set_status(session.id(), &status.id)
            .await
            .map_err(map_user_error)?;
        info!(status_id = %status.id, owner = %status.username, "created status");
        Ok(status)
    }

    async fn update_status(
        &self,
        session: Option<&SessionUser>,
        request: UpdateStatusRequest,
    ) -> Result<Option<Status>, Error> {
        let session = require_session(session)?;
        let id: StatusId = parse_id(&request.status_id, "statusId")?;
        let text = StatusText::new(&request.status_text).map_err(invalid_text)?;

        if self.ownership == OwnershipPolicy::Enforced {
            let Some(status) = self.find(&id).await? else {
                return Ok(None);
            };
            self.ownership
                .ensure_owner(session, &status.username, "status")?;
        }
        self.statuses
            .update_text(&id, text.as_ref())
            .await
            .map_err(map_status_error)
    }

    async fn add_comment(
        &self,
        session: Option<&SessionUser>,
        request: AddCommentRequest,
    ) -> Result<Option<Status>, Error> {
        let session = require_session(session)?;
        let id: StatusId = parse_id(&request.status_id, "statusId")?;
        let text = CommentText::new(&request.comment_text).map_err(invalid_text)?;

        let comment = Comment::new(text, session.username().clone(), self.clock.utc());
        self.statuses
            .push_comment(&id, &comment)
            .await
            .map_err(map_status_error)
    }

    async fn delete_comment(
        &self,
        session: Option<&SessionUser>,
        request: DeleteCommentRequest,
    ) -> Result<Option<Status>, Error> {
        let session = require_session(session)?;
        let id: StatusId = parse_id(&request.status_id, "statusId")?;
        let comment_id: CommentId = parse_id(&request.comment_id, "_id")?;

        if self.ownership == OwnershipPolicy::Enforced {
            let Some(status) = self.find(&id).await? else {
                return Ok(None);
            };
            let Some(comment) = status.comment(&comment_id) else {
                return Ok(Some(status));
            };
            self.ownership
                .ensure_comment_removal(session, &status, comment)?;
        }
        self.statuses
            .pull_comment(&id, &comment_id)
            .await
            .map_err(map_status_error)
    }
}

#[async_trait]
impl<S, U> StatusQuery for StatusService<S, U>
where
    S: StatusRepository,
    U: UserRepository,
{
    async fn statuses(&self, username: Option<&str>) -> Result<Vec<Status>, Error> {
        match OwnerFilter::parse(username) {
            OwnerFilter::All => self.statuses.list(None).await.map_err(map_status_error),
            OwnerFilter::Only(owner) => self
                .statuses
                .list(Some(owner))
                .await
                .map_err(map_status_error),
            OwnerFilter::Nothing => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
#[path = "status_service_tests.rs"]
mod tests;
