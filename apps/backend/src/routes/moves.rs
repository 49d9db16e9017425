use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::services::RoundsService;
use crate::state::app_state::AppState;

const EXPORT_FILENAME: &str = "moves.csv";

/// GET /api/moves/export.csv
async fn export_moves(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let csv = RoundsService::from_state(&app_state)
        .export_moves_csv(app_state.db())
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        ))
        .body(csv))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/export.csv", web::get().to(export_moves));
}
