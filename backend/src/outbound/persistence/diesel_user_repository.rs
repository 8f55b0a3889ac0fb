//! PostgreSQL-backed `UserRepository`.
//!
//! Pet references are kept in the `pet_ids` uuid array and edited in place
//! with `array_append` / `array_remove`, so linking a pet is one statement.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PetId, StatusId, User, UserId, UserPatch};

use super::diesel_error_mapping::ErrorCtors;
use super::models::{NewUserRow, UserChanges, UserRow};
use super::pool::DbPool;
use super::schema::users;

const ERRORS: ErrorCtors<UserPersistenceError> = ErrorCtors {
    connection: UserPersistenceError::connection,
    query: UserPersistenceError::query,
    duplicate: UserPersistenceError::duplicate,
};

const PUSH_PET_SQL: &str = "UPDATE users SET pet_ids = array_append(pet_ids, $2), \
     updated_at = now() WHERE id = $1";

const PULL_PET_SQL: &str = "UPDATE users SET pet_ids = array_remove(pet_ids, $1), \
     updated_at = now() WHERE $1 = ANY(pet_ids)";

/// Diesel implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from(row).map_err(|message| ERRORS.corrupt(message))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_user)
            .transpose()
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let changes = UserChanges {
            username: patch.username.as_ref().map(AsRef::as_ref),
            email: patch.email.as_ref().map(AsRef::as_ref),
            password_hash: patch.password_hash.as_ref().map(|hash| hash.as_str()),
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::update(users::table.find(id.as_uuid()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_user)
            .transpose()
    }

    async fn push_pet(&self, id: &UserId, pet_id: &PetId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        sql_query(PUSH_PET_SQL)
            .bind::<SqlUuid, _>(id.as_uuid())
            .bind::<SqlUuid, _>(pet_id.as_uuid())
            .execute(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(())
    }

    async fn pull_pet(&self, pet_id: &PetId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        sql_query(PULL_PET_SQL)
            .bind::<SqlUuid, _>(pet_id.as_uuid())
            .execute(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(())
    }

    async fn set_status(
        &self,
        id: &UserId,
        status_id: &StatusId,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::update(users::table.find(id.as_uuid()))
            .set((
                users::status_id.eq(*status_id.as_uuid()),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(())
    }
}
