use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries::MatchQueries;
use crate::handlers::league::{list_limit, require_confirmation, DEFAULT_LIST_LIMIT};
use crate::models::common::{ApiResponse, ConfirmQuery};
use crate::models::fixture::{CreateMatchRequest, MatchListQuery, UpdateMatchRequest};
use crate::services::{LeagueAdminService, LeagueError};

#[tracing::instrument(name = "List matches", skip(pool))]
pub async fn list_matches(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let matches = MatchQueries::new(pool.get_ref().clone()).list_matches().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} matches", matches.len()),
        matches,
    )))
}

#[tracing::instrument(name = "Recent results", skip(pool, query))]
pub async fn recent_results(
    pool: web::Data<PgPool>,
    query: web::Query<MatchListQuery>,
) -> Result<HttpResponse, LeagueError> {
    let limit = list_limit(query.limit, DEFAULT_LIST_LIMIT);
    let matches = MatchQueries::new(pool.get_ref().clone()).recent_results(limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Recent results retrieved", matches)))
}

#[tracing::instrument(name = "Upcoming matches", skip(pool, query))]
pub async fn upcoming_matches(
    pool: web::Data<PgPool>,
    query: web::Query<MatchListQuery>,
) -> Result<HttpResponse, LeagueError> {
    let limit = list_limit(query.limit, DEFAULT_LIST_LIMIT);
    let matches = MatchQueries::new(pool.get_ref().clone()).upcoming_matches(limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Upcoming matches retrieved", matches)))
}

#[tracing::instrument(name = "Live matches", skip(pool))]
pub async fn live_matches(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let matches = MatchQueries::new(pool.get_ref().clone()).live_matches().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Live matches retrieved", matches)))
}

/// Matches on the current UTC date.
#[tracing::instrument(name = "Today's matches", skip(pool))]
pub async fn todays_matches(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let today = Utc::now().date_naive();
    let matches = MatchQueries::new(pool.get_ref().clone()).matches_on(today).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Today's matches retrieved", matches)))
}

#[tracing::instrument(name = "Get match", skip(pool))]
pub async fn get_match(match_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let fixture = MatchQueries::new(pool.get_ref().clone())
        .get_match(match_id)
        .await?
        .ok_or(LeagueError::NotFound("Match"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match retrieved", fixture)))
}

#[tracing::instrument(
    name = "Create match",
    skip(request, admin),
    fields(home = %request.home_team_id, away = %request.away_team_id, date = %request.date)
)]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let fixture = admin.create_match(&request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Match created", fixture)))
}

#[tracing::instrument(name = "Update match", skip(request, admin))]
pub async fn update_match(
    match_id: Uuid,
    request: web::Json<UpdateMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let fixture = admin.update_match(match_id, &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match updated", fixture)))
}

#[tracing::instrument(name = "Delete match", skip(confirm, admin))]
pub async fn delete_match(
    match_id: Uuid,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    require_confirmation(&confirm)?;
    admin.delete_match(match_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Match deleted")))
}

#[tracing::instrument(name = "Delete all matches", skip(confirm, admin))]
pub async fn delete_all_matches(
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    require_confirmation(&confirm)?;
    let deleted = admin.delete_all_matches().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Deleted {} matches", deleted),
        deleted,
    )))
}
