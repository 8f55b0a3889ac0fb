//! Status posts and their embedded comments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, StatusId, Username};

/// Maximum number of characters in a status or comment.
pub const TEXT_MAX: usize = 280;

/// Validation errors for status and comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize },
}

impl TextValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}

impl fmt::Display for TextValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max } => write!(f, "{field} must be at most {max} characters"),
        }
    }
}

impl std::error::Error for TextValidationError {}

fn validate_text(raw: &str, field: &'static str) -> Result<String, TextValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TextValidationError::Empty { field });
    }
    if trimmed.chars().count() > TEXT_MAX {
        return Err(TextValidationError::TooLong {
            field,
            max: TEXT_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

macro_rules! define_text {
    ($(#[$outer:meta])* $name:ident => $field:literal) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl AsRef<str>) -> Result<Self, TextValidationError> {
                validate_text(raw.as_ref(), $field).map(Self)
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}

define_text! {
    /// Trimmed status body, 1..=280 characters.
    StatusText => "statusText"
}

define_text! {
    /// Trimmed comment body, 1..=280 characters.
    CommentText => "commentText"
}

/// Comment embedded in a status.
///
/// Serialised with the GraphQL field names because the SQL store keeps the
/// comment list as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,
    #[serde(rename = "commentText")]
    pub text: String,
    pub username: Username,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: CommentText, author: Username, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::random(),
            text: text.into_inner(),
            username: author,
            created_at,
        }
    }
}

/// Status post.
///
/// ## Invariants
/// - `comments` is kept in insertion order.
/// - each user owns at most one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: StatusId,
    pub text: String,
    pub username: Username,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl Status {
    pub fn new(id: StatusId, text: StatusText, owner: Username, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into_inner(),
            username: owner,
            created_at,
            comments: Vec::new(),
        }
    }

    /// Find an embedded comment by id.
    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| &comment.id == id)
    }

    /// Remove a comment, keeping the order of the rest. Returns whether
    /// anything was removed.
    pub fn remove_comment(&mut self, id: &CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|comment| &comment.id != id);
        self.comments.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("timestamp")
    }

    #[fixture]
    fn status() -> Status {
        let owner = Username::new("owner").expect("owner");
        let mut status = Status::new(
            StatusId::random(),
            StatusText::new("Out for a walk").expect("text"),
            owner.clone(),
            at(0),
        );
        for (i, text) in ["first", "second", "third"].into_iter().enumerate() {
            status.comments.push(Comment::new(
                CommentText::new(text).expect("comment"),
                owner.clone(),
                at(i64::try_from(i).expect("index") + 1),
            ));
        }
        status
    }

    #[rstest]
    #[case("", TextValidationError::Empty { field: "statusText" })]
    #[case("   ", TextValidationError::Empty { field: "statusText" })]
    #[case(&"x".repeat(TEXT_MAX + 1), TextValidationError::TooLong { field: "statusText", max: TEXT_MAX })]
    fn status_text_rejects_bad_input(#[case] raw: &str, #[case] expected: TextValidationError) {
        assert_eq!(StatusText::new(raw).expect_err("invalid"), expected);
    }

    #[rstest]
    fn text_at_limit_is_accepted() {
        let text = CommentText::new("y".repeat(TEXT_MAX)).expect("at limit");
        assert_eq!(text.as_ref().len(), TEXT_MAX);
    }

    #[rstest]
    fn remove_comment_preserves_order(mut status: Status) {
        let middle = status.comments[1].id;
        assert!(status.remove_comment(&middle));
        let texts: Vec<_> = status.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["first", "third"]);
    }

    #[rstest]
    fn remove_unknown_comment_is_a_no_op(mut status: Status) {
        assert!(!status.remove_comment(&CommentId::random()));
        assert_eq!(status.comments.len(), 3);
    }

    #[rstest]
    fn comment_serialises_with_graphql_names(status: Status) {
        let comment = &status.comments[0];
        let value = serde_json::to_value(comment).expect("serialise");
        assert_eq!(
            value,
            json!({
                "_id": comment.id.to_string(),
                "commentText": "first",
                "username": "owner",
                "createdAt": "1970-01-01T00:00:01Z",
            })
        );
    }
}
