use crate::app::SchoolService;
use crate::domain::SchoolListing;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: SchoolService,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ListSchoolsResponse {
    pub data: Vec<SchoolListing>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AddSchoolResponse {
    pub ok: bool,
    pub message: String,
    /// Id the store assigned to the new school.
    pub id: i64,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn json_400(err: JsonRejection) -> ApiError {
    api_error(
        StatusCode::BAD_REQUEST,
        format!("Invalid JSON body: {}", err.body_text()),
    )
}
