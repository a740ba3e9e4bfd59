use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_public_key<S: UserServicePort>(
    State(state): State<AppState<S>>,
) -> ApiSuccess<PublicKeyResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        PublicKeyResponseData {
            public_key: state.user_service.public_key().to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponseData {
    pub public_key: String,
}
