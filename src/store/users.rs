use sqlx::PgPool;

use crate::models::{User, UserSummary};

/// Inserts a new user and returns the stored row (without the hash).
pub async fn insert(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
         RETURNING id, name, email, created_at",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, user_id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Id and password hash for the login flow, looked up by email.
pub async fn credentials_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(i32, String)>, sqlx::Error> {
    sqlx::query_as::<_, (i32, String)>("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Current password hash for the profile-edit password check.
pub async fn password_hash_by_id(
    pool: &PgPool,
    user_id: i32,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Cheap existence probe used when resolving an assigned user id.
pub async fn exists(pool: &PgPool, user_id: i32) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map(|row| row.is_some())
}

/// Summaries for a set of user ids, fetched in one round trip. Missing ids
/// simply produce no row.
pub async fn summaries_by_ids(
    pool: &PgPool,
    user_ids: &[i32],
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>("SELECT id, name FROM users WHERE id = ANY($1)")
        .bind(user_ids)
        .fetch_all(pool)
        .await
}

/// All users, for assignee pickers.
pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Profile update. A `None` hash keeps the existing password.
pub async fn update(
    pool: &PgPool,
    user_id: i32,
    name: &str,
    email: &str,
    password_hash: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users \
         SET name = $2, email = $3, password_hash = COALESCE($4, password_hash), updated_at = NOW() \
         WHERE id = $1 \
         RETURNING id, name, email, created_at",
    )
    .bind(user_id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await
}
