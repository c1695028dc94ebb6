use crate::{
    auth::{hash_password, verify_password, AuthenticatedUserId},
    error::AppError,
    models::UpdateProfileRequest,
    store,
};
use actix_web::{get, patch, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// All users (id, name, email), for assignee pickers.
#[get("")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let users = store::users::list(&pool).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Users fetched successfully",
        "users": users
    })))
}

/// Edits the authenticated user's own profile. Name and email are replaced
/// when sent; a password change requires the current password alongside the
/// new one and fails with 400 when the current one does not verify.
#[patch("/me")]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    body: web::Json<UpdateProfileRequest>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let input = body.into_inner();

    let current = match store::users::find_by_id(&pool, user.0).await? {
        Some(current) => current,
        None => return Err(AppError::NotFound("User not found".into())),
    };

    let new_hash = match (&input.password, &input.new_password) {
        (Some(password), Some(new_password)) => {
            let stored_hash = store::users::password_hash_by_id(&pool, user.0)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;
            if !verify_password(password, &stored_hash)? {
                return Err(AppError::BadRequest("Invalid Password".into()));
            }
            Some(hash_password(new_password)?)
        }
        _ => None,
    };

    let name = input.name.unwrap_or(current.name);
    let email = input.email.unwrap_or(current.email);

    let updated = store::users::update(&pool, user.0, &name, &email, new_hash.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User updated successfully",
        "user": updated
    })))
}

/// A single user by id, without the password hash.
#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    match store::users::find_by_id(&pool, user_id.into_inner()).await? {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "message": "User found successfully",
            "user": user
        }))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
