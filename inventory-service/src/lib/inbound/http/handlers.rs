use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::user::errors::UserError;

pub mod create_item;
pub mod delete_item;
pub mod get_item;
pub mod list_items;
pub mod login;
pub mod refresh_token;
pub mod signup;
pub mod update_item;

/// Successful response: status code plus a bare JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

/// JSON request body whose rejections render as `ApiError`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Validation(_) => ApiError::BadRequest(err.to_string()),
            // Non-numeric or non-positive ids never match a stored item.
            ItemError::InvalidItemId(_) => ApiError::NotFound("Item not found".to_string()),
            ItemError::NotFound(_) => ApiError::NotFound("Item not found".to_string()),
            ItemError::DatabaseError(_) | ItemError::Cache(_) => {
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_)
            | UserError::InvalidPassword(_)
            | UserError::UsernameAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            UserError::Unauthorized(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            UserError::PasswordHashing(_)
            | UserError::TokenSigning(_)
            | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Wire shape of an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResponseData {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<&Item> for ItemResponseData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.0,
            name: item.name.as_str().to_string(),
            description: item.description.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheError;
    use crate::domain::item::errors::FieldError;
    use crate::domain::item::errors::ItemIdError;
    use crate::domain::item::errors::ValidationErrors;
    use crate::domain::item::models::ItemId;

    #[test]
    fn test_item_error_mapping() {
        assert!(matches!(
            ApiError::from(ItemError::Validation(ValidationErrors(vec![
                FieldError::Missing { field: "name" }
            ]))),
            ApiError::BadRequest(msg) if msg.contains("name: this field is required")
        ));
        assert_eq!(
            ApiError::from(ItemError::NotFound(ItemId(3))),
            ApiError::NotFound("Item not found".to_string())
        );
        assert_eq!(
            ApiError::from(ItemError::InvalidItemId(ItemIdError::NotPositive(0))),
            ApiError::NotFound("Item not found".to_string())
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let mapped = ApiError::from(ItemError::DatabaseError(
            "password authentication failed for user postgres".to_string(),
        ));
        assert_eq!(
            mapped,
            ApiError::InternalServerError("Internal server error".to_string())
        );

        let mapped = ApiError::from(ItemError::Cache(CacheError::Unavailable(
            "refused".to_string(),
        )));
        assert_eq!(
            mapped,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_user_error_mapping() {
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::BadRequest("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(UserError::UsernameAlreadyExists("testuser".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::Unauthorized("Token is expired".to_string())),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::BadRequest(String::new()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized(String::new()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound(String::new()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InternalServerError(String::new())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
