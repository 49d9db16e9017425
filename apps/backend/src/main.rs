use actix_web::{web, App, HttpServer};
use sim_backend::{
    build_state, cors_middleware, routes, BackendConfig, RequestTrace, StructuredLogger, TraceSpan,
};
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting policy simulation backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = match build_state()
        .with_storage(config.storage.clone())
        .with_pool(config.pool)
        .with_rng(config.random_source())
        .with_storage_timeout(config.storage_timeout)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected");
    info!(
        storage_timeout_ms = config.storage_timeout.as_millis() as u64,
        seeded = config.rng_seed.is_some(),
        "Application state ready"
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
