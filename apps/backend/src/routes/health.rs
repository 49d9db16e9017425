use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::logging::Redacted;
use crate::state::app_state::AppState;

/// Liveness: the process is up and serving.
async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("ok"))
}

#[derive(Debug, Serialize)]
struct ReadinessResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    migrations: String,
    time: String,
}

/// Readiness: storage answers and the schema version is known.
async fn ready(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.db();
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let probe = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 AS health_check".to_string(),
        ))
        .await;

    let (db_status, migrations) = match probe {
        Ok(_) => {
            let version = match get_latest_migration_version(db).await {
                Ok(Some(version)) => version,
                Ok(None) => "no_migrations".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok", version)
        }
        Err(e) => {
            // the error is not echoed to callers; it may carry the endpoint
            warn!(error = %Redacted(&e.to_string()), "Readiness probe failed");
            ("error", "unknown".to_string())
        }
    };

    Ok(HttpResponse::Ok().json(ReadinessResponse {
        status: if db_status == "ok" { "ok" } else { "degraded" },
        app_version: env!("CARGO_PKG_VERSION"),
        db: db_status,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health))
        .route("/ready", web::get().to(ready));
}
