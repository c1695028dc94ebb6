use crate::{
    auth::{generate_token, hash_password, verify_password, AuthResponse, LoginRequest, SignupRequest},
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Sign up a new user
///
/// Creates a user account and returns an authentication token.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;

    // Check if email already exists
    let existing = store::users::credentials_by_email(&pool, &signup_data.email).await?;
    if existing.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&signup_data.password)?;
    let user = store::users::insert(&pool, &signup_data.name, &signup_data.email, &password_hash)
        .await?;

    let token = generate_token(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}

/// Login user
///
/// Authenticates a user and returns an authentication token. Unknown email
/// and wrong password answer the same way, so the endpoint does not reveal
/// which of the two was wrong.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let credentials = store::users::credentials_by_email(&pool, &login_data.email).await?;

    match credentials {
        Some((user_id, password_hash)) => {
            if verify_password(&login_data.password, &password_hash)? {
                let token = generate_token(user_id)?;
                Ok(HttpResponse::Ok().json(AuthResponse { token, user_id }))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
