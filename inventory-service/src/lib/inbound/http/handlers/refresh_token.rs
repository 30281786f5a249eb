use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RefreshTokenRequest>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let refresh_token = body.refresh_token.ok_or_else(|| {
        ApiError::BadRequest("refresh_token: this field is required".to_string())
    })?;

    state
        .auth_service
        .refresh_access_token(&refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|access_token| {
            ApiSuccess::new(StatusCode::OK, RefreshTokenResponseData { access_token })
        })
}

#[derive(Clone, Default, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
}
