use super::types::{ErrorResponse, HealthResponse};
use crate::{
    Error,
    estimation::{DurationEstimator, EstimationRequest, EstimationResult},
};
use axum::{extract::State, http::StatusCode, response::Json};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub estimator: DurationEstimator,
    pub timeout: Duration,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, err: &Error) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }),
    )
}

pub async fn estimate_duration(
    State(state): State<AppState>,
    Json(request): Json<EstimationRequest>,
) -> Result<Json<EstimationResult>, HandlerError> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        description_len = request.task_description.len(),
        "Received duration estimate request"
    );

    if request.task_description.trim().is_empty() {
        let err = Error::invalid_input("taskDescription must not be empty");
        return Err(error_response(StatusCode::BAD_REQUEST, &err));
    }

    let outcome =
        tokio::time::timeout(state.timeout, state.estimator.estimate_duration(request)).await;

    match outcome {
        Ok(Ok(result)) => {
            info!(%request_id, "Duration estimate served");
            Ok(Json(result))
        }
        Ok(Err(e)) => {
            error!(%request_id, "Duration estimate failed: {}", e);
            let status = match &e {
                Error::ModelInvocation(_) | Error::SchemaValidation(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err(error_response(status, &e))
        }
        Err(_) => {
            let err = Error::model_invocation(format!(
                "model did not respond within {}s",
                state.timeout.as_secs()
            ));
            error!(%request_id, "Duration estimate timed out");
            Err(error_response(StatusCode::GATEWAY_TIMEOUT, &err))
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
