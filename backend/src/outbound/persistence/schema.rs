//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Fields created from uploaded CSV files.
    fields (id) {
        id -> Int8,
        /// Unique field name taken from the upload's file stem.
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// GPS samples belonging to a field.
    ///
    /// Rows are removed with their field (`ON DELETE CASCADE`).
    track_points (id) {
        id -> Int8,
        field_id -> Int8,
        point_index -> Int4,
        gps_time -> Timestamptz,
        longitude -> Float8,
        latitude -> Float8,
        x -> Float8,
        y -> Float8,
        velocity -> Float8,
        yaw -> Float8,
        state -> Bool,
        amplitude -> Float8,
        depth -> Int4,
        depth_value -> Int4,
    }
}

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        /// Either `admin` or `user`.
        role -> Varchar,
        /// PBKDF2 digest in `pbkdf2_sha256$rounds$salt$hash` form.
        password_digest -> Text,
        created_at -> Timestamptz,
        last_login_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Optional contact details, one row per account.
    user_profiles (user_id) {
        user_id -> Uuid,
        phone -> Nullable<Varchar>,
        organization -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(track_points -> fields (field_id));
diesel::joinable!(user_profiles -> accounts (user_id));

diesel::allow_tables_to_appear_in_same_query!(fields, track_points, accounts, user_profiles);
