use std::panic::AssertUnwindSafe;

use actix_web::{web, HttpResponse};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::ValidatedJson;
use crate::repos::rounds::Round;
use crate::services::{RoundResolver, RoundsService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub round_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub success: bool,
}

/// Round as shown on the DM console
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub id: Uuid,
    pub number: i32,
    pub public_brief: String,
    pub public_results: Option<String>,
    pub dm_notes: Option<String>,
    pub is_open: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Round> for RoundView {
    fn from(round: Round) -> Self {
        Self {
            id: round.id,
            number: round.number,
            public_brief: round.public_brief,
            public_results: round.public_results,
            dm_notes: round.dm_notes,
            is_open: round.is_open,
            created_at: round.created_at,
        }
    }
}

/// Round as shown to players; DM notes never leave the server on this path
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRoundView {
    pub id: Uuid,
    pub number: i32,
    pub public_brief: String,
    pub public_results: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Round> for PublicRoundView {
    fn from(round: Round) -> Self {
        Self {
            id: round.id,
            number: round.number,
            public_brief: round.public_brief,
            public_results: round.public_results,
            created_at: round.created_at,
        }
    }
}

/// An id that cannot name a round is reported the same way as an unknown one.
fn parse_round_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::from(DomainError::round_not_found()))
}

/// POST /api/rounds/resolve
async fn resolve_round(
    app_state: web::Data<AppState>,
    body: ValidatedJson<ResolveRequest>,
) -> Result<HttpResponse, AppError> {
    let round_id = parse_round_id(&body.round_id)?;
    let resolver = RoundResolver::from_state(&app_state);

    let outcome = AssertUnwindSafe(with_txn(&app_state, move |txn| {
        Box::pin(async move {
            resolver
                .resolve(txn, round_id)
                .await
                .map_err(AppError::from)
        })
    }))
    .catch_unwind()
    .await;

    match outcome {
        Ok(result) => {
            result?;
        }
        Err(_) => {
            warn!(%round_id, "Round resolution panicked; transaction dropped");
            return Err(AppError::unexpected(
                "Unexpected error while resolving round",
            ));
        }
    }

    Ok(HttpResponse::Ok().json(ResolveResponse { success: true }))
}

/// GET /api/rounds
async fn list_rounds(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rounds = RoundsService::from_state(&app_state)
        .dm_timeline(app_state.db())
        .await?;
    let views: Vec<RoundView> = rounds.into_iter().map(RoundView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

/// GET /api/rounds/public
async fn list_public_rounds(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rounds = RoundsService::from_state(&app_state)
        .public_timeline(app_state.db())
        .await?;
    let views: Vec<PublicRoundView> = rounds.into_iter().map(PublicRoundView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_rounds))
        .route("/public", web::get().to(list_public_rounds))
        .route("/resolve", web::post().to(resolve_round));
}
