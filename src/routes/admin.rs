// Mutations, mounted under /admin behind AuthMiddleware
use actix_web::{delete, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::handlers::league::{
    elimination_handler, live_match_handler, match_event_handler, match_handler, player_handler, team_handler,
};
use crate::models::common::ConfirmQuery;
use crate::models::elimination::{CreateEliminationMatchRequest, UpdateEliminationMatchRequest};
use crate::models::fixture::{
    CreateMatchRequest, FixtureKind, MinuteRequest, ScoreAdjustmentRequest, UpdateMatchRequest,
};
use crate::models::match_event::CreateMatchEventRequest;
use crate::models::player::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::models::team::{CreateTeamRequest, UpdateTeamRequest};
use crate::services::{LeagueAdminService, LeagueError, LiveMatchService, MatchEventService, TeamStatsService};

// Teams

#[post("/teams")]
pub async fn create_team(
    request: web::Json<CreateTeamRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    team_handler::create_team(request, admin).await
}

#[post("/teams/recalculate")]
pub async fn recalculate_stats(stats: web::Data<TeamStatsService>) -> Result<HttpResponse, LeagueError> {
    team_handler::recalculate_stats(stats).await
}

#[put("/teams/{team_id}")]
pub async fn update_team(
    path: web::Path<Uuid>,
    request: web::Json<UpdateTeamRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    team_handler::update_team(path.into_inner(), request, admin).await
}

#[delete("/teams/{team_id}")]
pub async fn delete_team(
    path: web::Path<Uuid>,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    team_handler::delete_team(path.into_inner(), confirm, admin).await
}

// Players

#[post("/players")]
pub async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    player_handler::create_player(request, admin).await
}

#[put("/players/{player_id}")]
pub async fn update_player(
    path: web::Path<Uuid>,
    request: web::Json<UpdatePlayerRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    player_handler::update_player(path.into_inner(), request, admin).await
}

#[delete("/players/{player_id}")]
pub async fn delete_player(
    path: web::Path<Uuid>,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    player_handler::delete_player(path.into_inner(), confirm, admin).await
}

// Regular matches

#[post("/matches")]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    match_handler::create_match(request, admin).await
}

#[delete("/matches")]
pub async fn delete_all_matches(
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    match_handler::delete_all_matches(confirm, admin).await
}

#[put("/matches/{match_id}")]
pub async fn update_match(
    path: web::Path<Uuid>,
    request: web::Json<UpdateMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    match_handler::update_match(path.into_inner(), request, admin).await
}

#[delete("/matches/{match_id}")]
pub async fn delete_match(
    path: web::Path<Uuid>,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    match_handler::delete_match(path.into_inner(), confirm, admin).await
}

#[post("/matches/{match_id}/start")]
pub async fn start_match(path: web::Path<Uuid>, live: web::Data<LiveMatchService>) -> Result<HttpResponse, LeagueError> {
    live_match_handler::start(FixtureKind::Regular, path.into_inner(), live).await
}

#[post("/matches/{match_id}/score")]
pub async fn adjust_match_score(
    path: web::Path<Uuid>,
    request: web::Json<ScoreAdjustmentRequest>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    live_match_handler::adjust_score(FixtureKind::Regular, path.into_inner(), request, live).await
}

#[post("/matches/{match_id}/minute")]
pub async fn set_match_minute(
    path: web::Path<Uuid>,
    request: web::Json<MinuteRequest>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    live_match_handler::set_minute(FixtureKind::Regular, path.into_inner(), request, live).await
}

#[post("/matches/{match_id}/finish")]
pub async fn finish_match(path: web::Path<Uuid>, live: web::Data<LiveMatchService>) -> Result<HttpResponse, LeagueError> {
    live_match_handler::finish(FixtureKind::Regular, path.into_inner(), live).await
}

#[post("/matches/{match_id}/events")]
pub async fn create_match_event(
    path: web::Path<Uuid>,
    request: web::Json<CreateMatchEventRequest>,
    events: web::Data<MatchEventService>,
) -> Result<HttpResponse, LeagueError> {
    match_event_handler::create_match_event(path.into_inner(), request, events).await
}

#[delete("/matches/{match_id}/events/{event_id}")]
pub async fn delete_match_event(
    path: web::Path<(Uuid, Uuid)>,
    confirm: web::Query<ConfirmQuery>,
    events: web::Data<MatchEventService>,
) -> Result<HttpResponse, LeagueError> {
    let (match_id, event_id) = path.into_inner();
    match_event_handler::delete_match_event(match_id, event_id, confirm, events).await
}

// Elimination bracket

#[post("/elimination-matches")]
pub async fn create_elimination_match(
    request: web::Json<CreateEliminationMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    elimination_handler::create_elimination_match(request, admin).await
}

#[put("/elimination-matches/{match_id}")]
pub async fn update_elimination_match(
    path: web::Path<Uuid>,
    request: web::Json<UpdateEliminationMatchRequest>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    elimination_handler::update_elimination_match(path.into_inner(), request, admin).await
}

#[delete("/elimination-matches/{match_id}")]
pub async fn delete_elimination_match(
    path: web::Path<Uuid>,
    confirm: web::Query<ConfirmQuery>,
    admin: web::Data<LeagueAdminService>,
) -> Result<HttpResponse, LeagueError> {
    elimination_handler::delete_elimination_match(path.into_inner(), confirm, admin).await
}

#[post("/elimination-matches/{match_id}/start")]
pub async fn start_elimination_match(
    path: web::Path<Uuid>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    live_match_handler::start(FixtureKind::Elimination, path.into_inner(), live).await
}

#[post("/elimination-matches/{match_id}/score")]
pub async fn adjust_elimination_score(
    path: web::Path<Uuid>,
    request: web::Json<ScoreAdjustmentRequest>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    live_match_handler::adjust_score(FixtureKind::Elimination, path.into_inner(), request, live).await
}

#[post("/elimination-matches/{match_id}/minute")]
pub async fn set_elimination_minute(
    path: web::Path<Uuid>,
    request: web::Json<MinuteRequest>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    live_match_handler::set_minute(FixtureKind::Elimination, path.into_inner(), request, live).await
}

#[post("/elimination-matches/{match_id}/finish")]
pub async fn finish_elimination_match(
    path: web::Path<Uuid>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    live_match_handler::finish(FixtureKind::Elimination, path.into_inner(), live).await
}
