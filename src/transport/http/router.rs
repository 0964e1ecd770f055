use crate::domain::{SchoolListing, SchoolSubmission};
use crate::transport::http::handlers::{health, schools};
use crate::transport::http::types::{
    AddSchoolResponse, AppState, ErrorResponse, HealthResponse, ListSchoolsResponse,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        schools::list_schools_handler,
        schools::add_school_handler
    ),
    components(schemas(
        SchoolSubmission,
        SchoolListing,
        ListSchoolsResponse,
        AddSchoolResponse,
        ErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/schools",
            get(schools::list_schools_handler).post(schools::add_school_handler),
        )
        .with_state(app_state)
}
