//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations/`.
//! `diesel print-schema` regenerates them from a live database.

diesel::table! {
    /// Cached response-capable places.
    ///
    /// `external_id` is the unique upsert key (`n123`, `w45`, `r6`).
    places (id) {
        /// Primary key: UUID v4 identifier assigned on first insert.
        id -> Uuid,
        /// Feed identifier, unique across the table.
        external_id -> Text,
        category -> Text,
        name -> Text,
        latitude -> Double,
        longitude -> Double,
        /// Declared or defaulted capacity.
        capacity -> Int4,
        specialties -> Array<Text>,
        created_at -> Timestamptz,
        /// Refreshed on every upsert.
        updated_at -> Timestamptz,
    }
}
