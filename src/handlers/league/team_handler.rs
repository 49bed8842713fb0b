use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::team_queries::TeamQueries;
use crate::handlers::league::require_confirmation;
use crate::models::common::{ApiResponse, ConfirmQuery};
use crate::models::team::{CreateTeamRequest, TeamQueryParams, TeamWithStats, UpdateTeamRequest};
use crate::services::{LeagueAdminService, LeagueError, TeamStatsService};

#[tracing::instrument(name = "List teams", skip(pool, query), fields(group = ?query.group))]
pub async fn list_teams(
    pool: web::Data<PgPool>,
    query: web::Query<TeamQueryParams>,
) -> Result<HttpResponse, LeagueError> {
    let teams: Vec<TeamWithStats> = TeamQueries::new(pool.get_ref().clone())
        .list_teams(query.group.as_deref())
        .await?
        .into_iter()
        .map(TeamWithStats::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} teams", teams.len()),
        teams,
    )))
}

#[tracing::instrument(name = "Get team", skip(pool))]
pub async fn get_team(team_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let team = TeamQueries::new(pool.get_ref().clone())
        .get_team(team_id)
        .await?
        .ok_or(LeagueError::NotFound("Team"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Team retrieved", TeamWithStats::from(team))))
}

#[tracing::instrument(
    name = "Create team",
    skip(request, admin),
    fields(name = %request.name, group = %request.group_name)
)]
pub async fn create_team(
    request: web::Json<CreateTeamRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let team = admin.create_team(&request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Team created", TeamWithStats::from(team))))
}

#[tracing::instrument(name = "Update team", skip(request, admin))]
pub async fn update_team(
    team_id: Uuid,
    request: web::Json<UpdateTeamRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    let team = admin.update_team(team_id, &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Team updated", TeamWithStats::from(team))))
}

#[tracing::instrument(name = "Delete team", skip(confirm, admin))]
pub async fn delete_team(
    team_id: Uuid,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    require_confirmation(&confirm)?;
    admin.delete_team(team_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Team deleted")))
}

/// Throw away the stored counters and derive them again from finished matches.
#[tracing::instrument(name = "Recalculate team stats", skip(stats))]
pub async fn recalculate_stats(stats: web::Data<TeamStatsService>) -> Result<HttpResponse, LeagueError> {
    let team_ids = stats.rebuild_from_history().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Recalculated stats for {} teams", team_ids.len()),
        team_ids,
    )))
}
