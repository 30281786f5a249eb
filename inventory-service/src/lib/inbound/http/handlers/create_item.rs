use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ItemResponseData;
use super::JsonBody;
use crate::domain::item::models::ItemDraft;
use crate::domain::user::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_item(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<ItemRequestBody>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let item = state
        .item_service
        .create_item(body.into_draft())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(
        item_id = %item.id,
        user_id = %caller.user_id,
        username = %caller.username,
        "Item created"
    );

    Ok(ApiSuccess::new(StatusCode::OK, (&item).into()))
}

/// HTTP request body shared by item create and update (raw JSON)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRequestBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ItemRequestBody {
    pub fn into_draft(self) -> ItemDraft {
        ItemDraft {
            name: self.name,
            description: self.description,
        }
    }
}
