//! PostgreSQL-backed `StatusRepository`.
//!
//! Comments are a JSONB array on the status row. Appending and removing a
//! comment are single `UPDATE ... RETURNING` statements, so concurrent
//! comment writers never overwrite each other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StatusPersistenceError, StatusRepository};
use crate::domain::{Comment, CommentId, Status, StatusId, Username};

use super::diesel_error_mapping::ErrorCtors;
use super::models::{NewStatusRow, StatusRow};
use super::pool::DbPool;
use super::schema::statuses;

const ERRORS: ErrorCtors<StatusPersistenceError> = ErrorCtors {
    connection: StatusPersistenceError::connection,
    query: StatusPersistenceError::query,
    duplicate: StatusPersistenceError::duplicate,
};

const PUSH_COMMENT_SQL: &str = "UPDATE statuses SET comments = comments || $2 \
     WHERE id = $1 \
     RETURNING id, status_text, username, created_at, comments";

const PULL_COMMENT_SQL: &str = "UPDATE statuses SET comments = COALESCE(( \
         SELECT jsonb_agg(elem ORDER BY ord) \
         FROM jsonb_array_elements(comments) WITH ORDINALITY AS t(elem, ord) \
         WHERE elem->>'_id' <> $2 \
     ), '[]'::jsonb) \
     WHERE id = $1 \
     RETURNING id, status_text, username, created_at, comments";

/// Diesel implementation of the [`StatusRepository`] port.
#[derive(Clone)]
pub struct DieselStatusRepository {
    pool: DbPool,
}

impl DieselStatusRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_status(row: StatusRow) -> Result<Status, StatusPersistenceError> {
    Status::try_from(row).map_err(|message| ERRORS.corrupt(message))
}

#[async_trait]
impl StatusRepository for DieselStatusRepository {
    async fn create(&self, status: &Status) -> Result<(), StatusPersistenceError> {
        let row = NewStatusRow::try_from_status(status)
            .map_err(|err| StatusPersistenceError::query(err.to_string()))?;
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::insert_into(statuses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(())
    }

    async fn list(&self, owner: Option<Username>) -> Result<Vec<Status>, StatusPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let mut query = statuses::table
            .select(StatusRow::as_select())
            .order((statuses::created_at.asc(), statuses::id.asc()))
            .into_boxed();
        if let Some(owner) = owner {
            query = query.filter(statuses::username.eq(String::from(owner)));
        }
        let rows = query
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        rows.into_iter().map(to_status).collect()
    }

    async fn find_by_id(&self, id: &StatusId) -> Result<Option<Status>, StatusPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        statuses::table
            .find(id.as_uuid())
            .select(StatusRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_status)
            .transpose()
    }

    async fn update_text(
        &self,
        id: &StatusId,
        text: &str,
    ) -> Result<Option<Status>, StatusPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::update(statuses::table.find(id.as_uuid()))
            .set(statuses::status_text.eq(text))
            .returning(StatusRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_status)
            .transpose()
    }

    async fn push_comment(
        &self,
        id: &StatusId,
        comment: &Comment,
    ) -> Result<Option<Status>, StatusPersistenceError> {
        let appended = serde_json::to_value([comment])
            .map_err(|err| StatusPersistenceError::query(err.to_string()))?;
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        sql_query(PUSH_COMMENT_SQL)
            .bind::<SqlUuid, _>(id.as_uuid())
            .bind::<Jsonb, _>(&appended)
            .get_result::<StatusRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_status)
            .transpose()
    }

    async fn pull_comment(
        &self,
        id: &StatusId,
        comment_id: &CommentId,
    ) -> Result<Option<Status>, StatusPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        sql_query(PULL_COMMENT_SQL)
            .bind::<SqlUuid, _>(id.as_uuid())
            .bind::<Text, _>(comment_id.to_string())
            .get_result::<StatusRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_status)
            .transpose()
    }
}
