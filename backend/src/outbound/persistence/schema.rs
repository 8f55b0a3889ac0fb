//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Registered accounts. `pet_ids` keeps pet references in the order
    /// they were added.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        pet_ids -> Array<Uuid>,
        status_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    pets (id) {
        id -> Uuid,
        name -> Varchar,
        age -> Nullable<Int4>,
        gender -> Nullable<Varchar>,
        breed -> Nullable<Varchar>,
        /// Owner username.
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Status posts with their comments embedded as a JSON array.
    statuses (id) {
        id -> Uuid,
        status_text -> Varchar,
        username -> Varchar,
        created_at -> Timestamptz,
        comments -> Jsonb,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, pets, statuses);
