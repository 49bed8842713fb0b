use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::config::league::LeagueSettings;
use crate::db::team_queries::TeamQueries;
use crate::league::standings::compute_standings;
use crate::models::common::ApiResponse;
use crate::services::LeagueError;

#[tracing::instrument(name = "Get standings", skip(pool))]
pub async fn get_standings(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let teams = TeamQueries::new(pool.get_ref().clone())
        .list_teams_in_fetch_order()
        .await?;
    let standings = compute_standings(teams);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Standings computed", standings)))
}

/// One group's table. A configured group without teams yields an empty table.
#[tracing::instrument(name = "Get group standings", skip(pool, league))]
pub async fn get_group_standings(
    group: String,
    pool: web::Data<PgPool>,
    league: web::Data<LeagueSettings>,
) -> Result<HttpResponse, LeagueError> {
    let teams = TeamQueries::new(pool.get_ref().clone())
        .list_teams_in_fetch_order()
        .await?;
    let mut standings = compute_standings(teams);

    let rows = match standings.remove(&group) {
        Some(rows) => rows,
        None if league.is_known_group(&group) => Vec::new(),
        None => return Err(LeagueError::NotFound("Group")),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("Standings for group {}", group), rows)))
}
