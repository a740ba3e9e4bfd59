use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::IssueTokenCommand;
use crate::domain::user::models::IssuedToken;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn issue_token<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Json(body): Json<IssueTokenRequest>,
) -> Result<ApiSuccess<IssueTokenResponseData>, ApiError> {
    state
        .user_service
        .issue_token(IssueTokenCommand::new(name, body.password))
        .await
        .map_err(ApiError::from)
        .map(|issued| ApiSuccess::new(StatusCode::OK, issued.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct IssueTokenRequest {
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Seconds until `expires_at`
    pub max_age: i64,
}

impl From<IssuedToken> for IssueTokenResponseData {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
            max_age: issued.max_age,
        }
    }
}
