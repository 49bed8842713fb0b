use actix_web::{web, HttpResponse};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::common::ApiResponse;
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        email = %login_form.email
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> HttpResponse {
    let user_result = sqlx::query("SELECT id, email, password_hash FROM users WHERE email = $1")
        .bind(login_form.email.trim().to_lowercase())
        .fetch_optional(pool.get_ref())
        .await;

    let row = match user_result {
        Ok(Some(row)) => row,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid email or password"));
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let (user_id, email, password_hash) = match (
        row.try_get::<Uuid, _>("id"),
        row.try_get::<String, _>("email"),
        row.try_get::<String, _>("password_hash"),
    ) {
        (Ok(id), Ok(email), Ok(hash)) => (id, email, hash),
        _ => {
            tracing::error!("Failed to decode user row");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if !verify_password(login_form.password.expose_secret(), &password_hash) {
        tracing::info!("Invalid password");
        return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid email or password"));
    }

    let claims = Claims {
        sub: user_id.to_string(),
        email,
        exp: jwt_settings.expires_at(),
    };

    let token = match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    HttpResponse::Ok().json(LoginResponse { token })
}

/// The session behind the presented token. Signing out is the client
/// dropping its token.
pub async fn current_session(claims: web::ReqData<Claims>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("Session active", claims.into_inner()))
}
