use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::utils::password::hash_password;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("an account with this email already exists")]
    DuplicateEmail,
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        email = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>
) -> HttpResponse {
    match insert_user(&user_form, &pool).await {
        Ok(user_id) => HttpResponse::Created().json(ApiResponse::success("User registered", user_id)),
        Err(RegistrationError::Invalid(message)) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
        }
        Err(RegistrationError::DuplicateEmail) => HttpResponse::Conflict()
            .json(ApiResponse::<()>::error(RegistrationError::DuplicateEmail.to_string())),
        Err(e) => {
            tracing::error!("Failed to register user: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn insert_user(
    user_form: &RegistrationRequest,
    pool: &PgPool
) -> Result<Uuid, RegistrationError> {
    let email = user_form.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(RegistrationError::Invalid("email address is not valid"));
    }
    if user_form.password.expose_secret().len() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::Invalid("password must be at least 8 characters"));
    }

    let user_id = Uuid::new_v4();
    let password_hash = hash_password(user_form.password.expose_secret())?;

    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(&email)
        .bind(&password_hash)
        .execute(pool)
        .await
        .map_err(|e| match e.as_database_error().and_then(|d| d.code()) {
            Some(code) if code == "23505" => RegistrationError::DuplicateEmail,
            _ => RegistrationError::Database(e),
        })?;

    Ok(user_id)
}
