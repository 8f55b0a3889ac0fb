//! PostgreSQL-backed `PetRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{Pet, PetChanges, PetId, Username};

use super::diesel_error_mapping::ErrorCtors;
use super::models::{NewPetRow, PetChangesRow, PetRow};
use super::pool::DbPool;
use super::schema::pets;

const ERRORS: ErrorCtors<PetPersistenceError> = ErrorCtors {
    connection: PetPersistenceError::connection,
    query: PetPersistenceError::query,
    duplicate: PetPersistenceError::duplicate,
};

/// Diesel implementation of the [`PetRepository`] port.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_pet(row: PetRow) -> Result<Pet, PetPersistenceError> {
    Pet::try_from(row).map_err(|message| ERRORS.corrupt(message))
}

fn to_pets(rows: Vec<PetRow>) -> Result<Vec<Pet>, PetPersistenceError> {
    rows.into_iter().map(to_pet).collect()
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::insert_into(pets::table)
            .values(NewPetRow::from(pet))
            .execute(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        Ok(())
    }

    async fn list(&self, owner: Option<Username>) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let mut query = pets::table
            .select(PetRow::as_select())
            .order((pets::created_at.asc(), pets::id.asc()))
            .into_boxed();
        if let Some(owner) = owner {
            query = query.filter(pets::username.eq(String::from(owner)));
        }
        let rows = query
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;
        to_pets(rows)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        pets::table
            .find(id.as_uuid())
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_pet)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[PetId]) -> Result<Vec<Pet>, PetPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        let rows: Vec<PetRow> = pets::table
            .filter(pets::id.eq_any(&uuids))
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| ERRORS.diesel(err))?;

        let mut by_id: HashMap<Uuid, PetRow> = rows.into_iter().map(|row| (row.id, row)).collect();
        uuids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(to_pet)
            .collect()
    }

    async fn update(
        &self,
        id: &PetId,
        changes: &PetChanges,
    ) -> Result<Option<Pet>, PetPersistenceError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let row_changes = PetChangesRow {
            name: changes.name.as_deref(),
            age: changes.age,
            gender: changes.gender.as_deref(),
            breed: changes.breed.as_deref(),
        };
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::update(pets::table.find(id.as_uuid()))
            .set(&row_changes)
            .returning(PetRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_pet)
            .transpose()
    }

    async fn delete(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(|err| ERRORS.pool(err))?;
        diesel::delete(pets::table.find(id.as_uuid()))
            .returning(PetRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| ERRORS.diesel(err))?
            .map(to_pet)
            .transpose()
    }
}
