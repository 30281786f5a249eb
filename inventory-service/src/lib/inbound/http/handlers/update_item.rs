use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_item::ItemRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::ItemResponseData;
use super::JsonBody;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::ItemId;
use crate::inbound::http::router::AppState;

/// Full replacement of name and description.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    JsonBody(body): JsonBody<ItemRequestBody>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let item_id = ItemId::from_string(&item_id).map_err(ItemError::from)?;

    state
        .item_service
        .update_item(&item_id, body.into_draft())
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::OK, item.into()))
}
