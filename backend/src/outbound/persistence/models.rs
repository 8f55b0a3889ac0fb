//! Internal Diesel row structs and their conversion into domain documents.
//!
//! Rows are never exposed to the domain. Conversions fail when stored data
//! no longer satisfies the domain invariants; repositories report those as
//! query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Comment, Email, PasswordHash, Pet, PetId, Status, StatusId, User, UserId, Username,
};

use super::schema::{pets, statuses, users};

/// Row read back from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub pet_ids: Vec<Uuid>,
    pub status_id: Option<Uuid>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub pet_ids: Vec<Uuid>,
    pub status_id: Option<Uuid>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
            pet_ids: user.pet_ids().iter().map(|id| *id.as_uuid()).collect(),
            status_id: user.status_id().map(|id| *id.as_uuid()),
        }
    }
}

/// Profile changes; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChanges<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| format!("stored user {}: {err}", row.id))?;
        let email =
            Email::new(&row.email).map_err(|err| format!("stored user {}: {err}", row.id))?;
        Ok(User::new(
            UserId::from_uuid(row.id),
            username,
            email,
            PasswordHash::from_encoded(row.password_hash),
        )
        .with_pet_ids(row.pet_ids.into_iter().map(PetId::from_uuid).collect())
        .with_status_id(row.status_id.map(StatusId::from_uuid)))
    }
}

/// Row read back from `pets`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub breed: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub age: Option<i32>,
    pub gender: Option<&'a str>,
    pub breed: Option<&'a str>,
    pub username: &'a str,
}

impl<'a> From<&'a Pet> for NewPetRow<'a> {
    fn from(pet: &'a Pet) -> Self {
        Self {
            id: *pet.id.as_uuid(),
            name: &pet.name,
            age: pet.age,
            gender: pet.gender.as_deref(),
            breed: pet.breed.as_deref(),
            username: pet.username.as_ref(),
        }
    }
}

/// Pet field overwrites; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pets)]
pub(crate) struct PetChangesRow<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
    pub gender: Option<&'a str>,
    pub breed: Option<&'a str>,
}

impl TryFrom<PetRow> for Pet {
    type Error = String;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let username =
            Username::new(&row.username).map_err(|err| format!("stored pet {}: {err}", row.id))?;
        Ok(Pet {
            id: PetId::from_uuid(row.id),
            name: row.name,
            age: row.age,
            gender: row.gender,
            breed: row.breed,
            username,
        })
    }
}

/// Row read back from `statuses`, by the query builder or by raw SQL
/// with a `RETURNING` clause.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StatusRow {
    pub id: Uuid,
    pub status_text: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub comments: serde_json::Value,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = statuses)]
pub(crate) struct NewStatusRow<'a> {
    pub id: Uuid,
    pub status_text: &'a str,
    pub username: &'a str,
    pub created_at: DateTime<Utc>,
    pub comments: serde_json::Value,
}

impl<'a> NewStatusRow<'a> {
    pub(crate) fn try_from_status(status: &'a Status) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: *status.id.as_uuid(),
            status_text: &status.text,
            username: status.username.as_ref(),
            created_at: status.created_at,
            comments: serde_json::to_value(&status.comments)?,
        })
    }
}

impl TryFrom<StatusRow> for Status {
    type Error = String;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| format!("stored status {}: {err}", row.id))?;
        let comments: Vec<Comment> = serde_json::from_value(row.comments)
            .map_err(|err| format!("stored status {} comments: {err}", row.id))?;
        Ok(Status {
            id: StatusId::from_uuid(row.id),
            text: row.status_text,
            username,
            created_at: row.created_at,
            comments,
        })
    }
}
