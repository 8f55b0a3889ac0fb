//! GraphQL mapping for domain errors.
//!
//! Every resolver failure becomes a GraphQL error entry whose
//! `extensions.code` carries the [`ErrorCode`] wire name. Internal errors
//! are logged in full and redacted for clients.

use async_graphql::{ErrorExtensions, Value};
use tracing::error;

use crate::domain::{Error, ErrorCode};

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), trace_id = ?self.trace_id(), "resolver failed");
        }
        let client = self.redacted();
        async_graphql::Error::new(client.message()).extend_with(|_, extensions| {
            extensions.set("code", client.code().as_str());
            if let Some(trace_id) = client.trace_id() {
                extensions.set("traceId", trace_id);
            }
            if let Some(details) = client.details() {
                extensions.set(
                    "details",
                    Value::from_json(details.clone()).unwrap_or(Value::Null),
                );
            }
        })
    }
}
