//! GraphQL endpoints.
//!
//! ```text
//! POST /graphql         {"query": "...", "variables": {...}}
//! GET  /graphql         GraphiQL explorer (debug builds)
//! GET  /graphql/schema  SDL
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use tracing::debug;

use crate::inbound::graphql::Session;

use super::session::SessionContext;
use super::state::HttpState;

/// Responses depend on the caller's token and must not be shared.
const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Execute one GraphQL request as the bearer-token caller.
///
/// Executed requests always answer `200 OK`; resolver failures are listed
/// in the envelope's `errors` array.
#[post("/graphql")]
pub async fn execute(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<async_graphql::Request>,
) -> HttpResponse {
    let request = payload.into_inner();
    debug!(
        operation = request.operation_name.as_deref().unwrap_or("anonymous"),
        authenticated = session.user().is_some(),
        "executing graphql request"
    );
    let response = state
        .schema
        .execute(request.data(Session(session.into_inner())))
        .await;
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, PRIVATE_NO_CACHE))
        .json(response)
}

/// Schema definition language of the served API.
#[get("/graphql/schema")]
pub async fn schema(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(state.schema.sdl())
}

/// In-browser explorer pointed at `POST /graphql`.
#[cfg(debug_assertions)]
#[get("/graphql")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            async_graphql::http::GraphiQLSource::build()
                .endpoint("/graphql")
                .finish(),
        )
}
