use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::config::jwt::JwtSettings;
use crate::handlers::auth_handler::{current_session, login_user};
use crate::middleware::auth::Claims;
use crate::models::auth::LoginRequest;

#[post("/login")]
pub async fn login(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> HttpResponse {
    login_user(login_form, pool, jwt_settings).await
}

/// Mounted under the authenticated `/admin` scope.
#[get("/session")]
pub async fn session(claims: web::ReqData<Claims>) -> HttpResponse {
    current_session(claims).await
}
