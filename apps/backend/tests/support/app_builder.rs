use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use sim_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use sim_backend::routes;
use sim_backend::state::app_state::AppState;

/// Build the production route table around `state` and send one request.
///
/// CORS is left out; everything else matches `main.rs`, middleware order
/// included. The state is cloned, so repeated calls share one database.
pub async fn call(state: &AppState, req: test::TestRequest) -> ServiceResponse<BoxBody> {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    test::call_service(&app, req.to_request()).await
}
