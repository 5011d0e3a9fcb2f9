use axum::Json;
use serde::Serialize;

/// JSON response body.
#[derive(Serialize)]
pub(super) struct SubmissionsInfoResponse {
    message: &'static str,
}

/// Static description of the submissions endpoint.
pub(super) async fn info() -> Json<SubmissionsInfoResponse> {
    Json(SubmissionsInfoResponse {
        message: "Submissions API endpoint",
    })
}
