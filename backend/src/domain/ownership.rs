//! Ownership checks for mutations on existing documents.

use super::{Comment, Error, SessionUser, Status, Username};

/// Whether mutations verify that the caller owns the target document.
///
/// `Unchecked` lets any logged-in user update or delete any pet, update any
/// status, and add or delete any comment. `Enforced` requires the caller to
/// own the pet or status; a comment may be deleted by its author or by the
/// owner of the status it sits on. Adding comments stays open to every
/// logged-in user under both policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    #[default]
    Unchecked,
    Enforced,
}

impl OwnershipPolicy {
    /// Build a policy from the `enforce_ownership` setting.
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            Self::Enforced
        } else {
            Self::Unchecked
        }
    }

    /// Require `session` to be `owner` of a `kind` document.
    pub fn ensure_owner(
        self,
        session: &SessionUser,
        owner: &Username,
        kind: &str,
    ) -> Result<(), Error> {
        match self {
            Self::Unchecked => Ok(()),
            Self::Enforced if session.username() == owner => Ok(()),
            Self::Enforced => Err(Error::forbidden(format!("You can only modify your own {kind}"))),
        }
    }

    /// Require `session` to be the comment author or the status owner.
    pub fn ensure_comment_removal(
        self,
        session: &SessionUser,
        status: &Status,
        comment: &Comment,
    ) -> Result<(), Error> {
        match self {
            Self::Unchecked => Ok(()),
            Self::Enforced
                if session.username() == &comment.username
                    || session.username() == &status.username =>
            {
                Ok(())
            }
            Self::Enforced => Err(Error::forbidden(
                "Only the comment author or the status owner can delete a comment",
            )),
        }
    }
}
