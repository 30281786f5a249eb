use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::TokenPair;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<JsonBody<LoginRequest>, ApiError>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // An unreadable body or absent fields fail exactly like a wrong password.
    let JsonBody(body) = body.map_err(|_| ApiError::from(UserError::InvalidCredentials))?;
    let command = LoginCommand {
        username: body.username.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
    };

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

#[derive(Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for LoginResponseData {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
