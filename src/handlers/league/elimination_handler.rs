use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::elimination_queries::EliminationQueries;
use crate::handlers::league::require_confirmation;
use crate::models::common::{ApiResponse, ConfirmQuery};
use crate::models::elimination::{CreateEliminationMatchRequest, UpdateEliminationMatchRequest};
use crate::services::{LeagueAdminService, LeagueError};

#[tracing::instrument(name = "Get bracket", skip(pool))]
pub async fn list_bracket(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let bracket = EliminationQueries::new(pool.get_ref().clone()).list_bracket().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Bracket retrieved", bracket)))
}

pub async fn get_elimination_match(match_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let fixture = EliminationQueries::new(pool.get_ref().clone())
        .get_elimination_match(match_id)
        .await?
        .ok_or(LeagueError::NotFound("Elimination match"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Elimination match retrieved", fixture)))
}

#[tracing::instrument(
    name = "Create elimination match",
    skip(request, admin),
    fields(stage = %request.stage.as_str(), match_number = request.match_number)
)]
pub async fn create_elimination_match(
    request: web::Json<CreateEliminationMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let fixture = admin.create_elimination_match(&request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Elimination match created", fixture)))
}

#[tracing::instrument(name = "Update elimination match", skip(request, admin))]
pub async fn update_elimination_match(
    match_id: Uuid,
    request: web::Json<UpdateEliminationMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let fixture = admin.update_elimination_match(match_id, &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Elimination match updated", fixture)))
}

#[tracing::instrument(name = "Delete elimination match", skip(confirm, admin))]
pub async fn delete_elimination_match(
    match_id: Uuid,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    require_confirmation(&confirm)?;
    admin.delete_elimination_match(match_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Elimination match deleted")))
}
