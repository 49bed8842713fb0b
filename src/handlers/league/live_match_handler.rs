use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::models::common::ApiResponse;
use crate::models::fixture::{FixtureKind, MinuteRequest, ScoreAdjustmentRequest};
use crate::services::{LeagueError, LiveMatchService};

// Shared by regular and elimination routes; only `kind` differs.

pub async fn start(
    kind: FixtureKind,
    fixture_id: Uuid,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    let snapshot = live.start(kind, fixture_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} started", kind.label()), snapshot)))
}

pub async fn adjust_score(
    kind: FixtureKind,
    fixture_id: Uuid,
    request: web::Json<ScoreAdjustmentRequest>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    let snapshot = live
        .adjust_live_score(kind, fixture_id, request.side, request.delta)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Live score updated", snapshot)))
}

pub async fn set_minute(
    kind: FixtureKind,
    fixture_id: Uuid,
    request: web::Json<MinuteRequest>,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    let snapshot = live.set_minute(kind, fixture_id, request.minute).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Minute updated", snapshot)))
}

pub async fn finish(
    kind: FixtureKind,
    fixture_id: Uuid,
    live: web::Data<LiveMatchService>,
) -> Result<HttpResponse, LeagueError> {
    let snapshot = live.finish(kind, fixture_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} finished", kind.label()), snapshot)))
}
