use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_event_queries::MatchEventQueries;
use crate::handlers::league::require_confirmation;
use crate::models::common::{ApiResponse, ConfirmQuery};
use crate::models::match_event::CreateMatchEventRequest;
use crate::services::{LeagueError, MatchEventService};

#[tracing::instrument(name = "List match events", skip(pool))]
pub async fn list_match_events(match_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, LeagueError> {
    let events = MatchEventQueries::new(pool.get_ref().clone())
        .list_for_match(match_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match events retrieved", events)))
}

pub async fn create_match_event(
    match_id: Uuid,
    request: web::Json<CreateMatchEventRequest>,
    events: web::Data<MatchEventService>,
) -> Result<HttpResponse, LeagueError> {
    let event = events.create_event(match_id, &request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Match event recorded", event)))
}

pub async fn delete_match_event(
    match_id: Uuid,
    event_id: Uuid,
    confirm: web::Query<ConfirmQuery>,
    events: web::Data<MatchEventService>,
) -> Result<HttpResponse, LeagueError> {
    require_confirmation(&confirm)?;
    events.delete_event(match_id, event_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Match event deleted")))
}
