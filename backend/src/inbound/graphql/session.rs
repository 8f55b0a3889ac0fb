//! Per-request caller identity attached to GraphQL execution.

use async_graphql::Context;

use crate::domain::SessionUser;

/// Request data carrying the decoded bearer token, if any.
///
/// The HTTP adapter attaches exactly one `Session` to every executed
/// request; an anonymous caller carries `Session(None)`.
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<SessionUser>);

impl Session {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(user: SessionUser) -> Self {
        Self(Some(user))
    }
}

/// Session user of the executing request.
pub(super) fn session_user<'a>(ctx: &Context<'a>) -> Option<&'a SessionUser> {
    ctx.data_opt::<Session>()
        .and_then(|session| session.0.as_ref())
}
