use actix_web::web;

pub mod health;
pub mod moves;
pub mod rounds;

/// Register every route. Used by `main.rs` and by the integration tests, so
/// both serve exactly the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health, /health/ready
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Round routes: /api/rounds/**
    cfg.service(web::scope("/api/rounds").configure(rounds::configure_routes));

    // Move routes: /api/moves/**
    cfg.service(web::scope("/api/moves").configure(moves::configure_routes));
}
