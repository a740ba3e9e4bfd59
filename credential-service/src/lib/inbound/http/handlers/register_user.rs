use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn register_user<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .register(RegisterCommand::new(name, body.password))
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::CREATED)
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    password: String,
}
