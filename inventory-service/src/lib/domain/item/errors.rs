use std::fmt;

use thiserror::Error;

use crate::domain::cache::CacheError;
use crate::domain::item::models::ItemId;

/// Error for ItemId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("Invalid item ID format: {0}")]
    InvalidFormat(String),

    #[error("Item ID must be positive, got {0}")]
    NotPositive(i64),
}

/// Error for a single item field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field}: this field is required")]
    Missing { field: &'static str },

    #[error("{field}: this field may not be blank")]
    Blank { field: &'static str },

    #[error("{field}: ensure this field has no more than {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Every field error found while validating one item draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// Top-level error for all inventory item operations
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("Invalid item ID: {0}")]
    InvalidItemId(#[from] ItemIdError),

    #[error("Invalid item: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ItemError {
    /// Backend failures, as opposed to caller mistakes.
    pub fn is_internal(&self) -> bool {
        matches!(self, ItemError::DatabaseError(_) | ItemError::Cache(_))
    }
}
