use crate::domain::SchoolSubmission;
use crate::transport::http::handlers::common::service_error_response;
use crate::transport::http::types::{
    json_400, AddSchoolResponse, AppState, ErrorResponse, ListSchoolsResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/schools",
    responses(
        (status = 200, description = "Schools, most recent first", body = ListSchoolsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_schools_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_schools().await {
        Ok(data) => (StatusCode::OK, Json(ListSchoolsResponse { data })).into_response(),
        Err(e) => service_error_response(e, "Failed to fetch schools").into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/schools",
    request_body = SchoolSubmission,
    responses(
        (status = 200, description = "School added", body = AddSchoolResponse),
        (status = 400, description = "Validation failure or malformed JSON", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn add_school_handler(
    State(state): State<AppState>,
    request: Result<Json<SchoolSubmission>, JsonRejection>,
) -> impl IntoResponse {
    let Json(submission) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e).into_response(),
    };

    match state.service.add_school(&submission).await {
        Ok(record) => (
            StatusCode::OK,
            Json(AddSchoolResponse {
                ok: true,
                message: "School added.".to_string(),
                id: record.id,
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e, "Failed to add school").into_response(),
    }
}
