use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::player_queries::PlayerQueries;
use crate::handlers::league::{list_limit, require_confirmation, DEFAULT_TOP_SCORERS};
use crate::models::common::{ApiResponse, ConfirmQuery};
use crate::models::player::{CreatePlayerRequest, PlayerQueryParams, TopScorersQuery, UpdatePlayerRequest};
use crate::services::{LeagueAdminService, LeagueError};

#[tracing::instrument(name = "List players", skip(pool, query), fields(team_id = ?query.team_id))]
pub async fn list_players(
    pool: web::Data<PgPool>,
    query: web::Query<PlayerQueryParams>,
) -> Result<HttpResponse, LeagueError> {
    let players = PlayerQueries::new(pool.get_ref().clone())
        .list_players(query.team_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} players", players.len()),
        players,
    )))
}

#[tracing::instrument(name = "Top scorers", skip(pool, query))]
pub async fn top_scorers(
    pool: web::Data<PgPool>,
    query: web::Query<TopScorersQuery>,
) -> Result<HttpResponse, LeagueError> {
    let limit = list_limit(query.limit, DEFAULT_TOP_SCORERS);
    let players = PlayerQueries::new(pool.get_ref().clone()).top_scorers(limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Top scorers retrieved", players)))
}

pub async fn get_player(player_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let player = PlayerQueries::new(pool.get_ref().clone())
        .get_player(player_id)
        .await?
        .ok_or(LeagueError::NotFound("Player"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Player retrieved", player)))
}

#[tracing::instrument(
    name = "Create player",
    skip(request, admin),
    fields(name = %request.name, team_id = %request.team_id)
)]
pub async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let player = admin.create_player(&request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Player created", player)))
}

#[tracing::instrument(name = "Update player", skip(request, admin))]
pub async fn update_player(
    player_id: Uuid,
    request: web::Json<UpdatePlayerRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let player = admin.update_player(player_id, &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Player updated", player)))
}

#[tracing::instrument(name = "Delete player", skip(confirm, admin))]
pub async fn delete_player(
    player_id: Uuid,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    require_confirmation(&confirm)?;
    admin.delete_player(player_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Player deleted")))
}
