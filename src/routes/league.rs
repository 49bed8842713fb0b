// Public read side, mounted under /league
use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::league::LeagueSettings;
use crate::handlers::league::{
    elimination_handler, match_event_handler, match_handler, player_handler, standings_handler, team_handler,
};
use crate::models::fixture::MatchListQuery;
use crate::models::player::{PlayerQueryParams, TopScorersQuery};
use crate::models::team::TeamQueryParams;
use crate::services::LeagueError;

#[get("/teams")]
pub async fn list_teams(
    pool: web::Data<PgPool>,
    query: web::Query<TeamQueryParams>,
) -> Result<HttpResponse, LeagueError> {
    team_handler::list_teams(pool, query).await
}

#[get("/teams/{team_id}")]
pub async fn get_team(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    team_handler::get_team(path.into_inner(), pool).await
}

#[get("/standings")]
pub async fn get_standings(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    standings_handler::get_standings(pool).await
}

#[get("/standings/{group}")]
pub async fn get_group_standings(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
    league: web::Data<LeagueSettings>,
) -> Result<HttpResponse, LeagueError> {
    standings_handler::get_group_standings(path.into_inner(), pool, league).await
}

#[get("/players")]
pub async fn list_players(
    pool: web::Data<PgPool>,
    query: web::Query<PlayerQueryParams>,
) -> Result<HttpResponse, LeagueError> {
    player_handler::list_players(pool, query).await
}

#[get("/players/top-scorers")]
pub async fn top_scorers(
    pool: web::Data<PgPool>,
    query: web::Query<TopScorersQuery>,
) -> Result<HttpResponse, LeagueError> {
    player_handler::top_scorers(pool, query).await
}

#[get("/players/{player_id}")]
pub async fn get_player(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    player_handler::get_player(path.into_inner(), pool).await
}

#[get("/matches")]
pub async fn list_matches(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    match_handler::list_matches(pool).await
}

#[get("/matches/recent")]
pub async fn recent_results(
    pool: web::Data<PgPool>,
    query: web::Query<MatchListQuery>,
) -> Result<HttpResponse, LeagueError> {
    match_handler::recent_results(pool, query).await
}

#[get("/matches/upcoming")]
pub async fn upcoming_matches(
    pool: web::Data<PgPool>,
    query: web::Query<MatchListQuery>,
) -> Result<HttpResponse, LeagueError> {
    match_handler::upcoming_matches(pool, query).await
}

#[get("/matches/live")]
pub async fn live_matches(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    match_handler::live_matches(pool).await
}

#[get("/matches/today")]
pub async fn todays_matches(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    match_handler::todays_matches(pool).await
}

#[get("/matches/{match_id}")]
pub async fn get_match(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    match_handler::get_match(path.into_inner(), pool).await
}

#[get("/matches/{match_id}/events")]
pub async fn list_match_events(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    match_event_handler::list_match_events(path.into_inner(), pool).await
}

#[get("/elimination-matches")]
pub async fn list_bracket(pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    elimination_handler::list_bracket(pool).await
}

#[get("/elimination-matches/{match_id}")]
pub async fn get_elimination_match(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    elimination_handler::get_elimination_match(path.into_inner(), pool).await
}
