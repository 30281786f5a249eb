use std::fmt;

use crate::domain::item::errors::FieldError;
use crate::domain::item::errors::ItemError;
use crate::domain::item::errors::ItemIdError;
use crate::domain::item::errors::ValidationErrors;

/// Inventory item entity.
///
/// `id` is assigned by the Record Store on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: ItemName,
    pub description: ItemDescription,
}

/// Item unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Parse an item ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not an integer
    /// * `NotPositive` - Zero or negative
    pub fn from_string(s: &str) -> Result<Self, ItemIdError> {
        let id = s
            .parse::<i64>()
            .map_err(|e| ItemIdError::InvalidFormat(format!("{}: {}", s, e)))?;

        if id <= 0 {
            return Err(ItemIdError::NotPositive(id));
        }

        Ok(Self(id))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Item name value type
///
/// Non-blank, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    const FIELD: &'static str = "name";
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, FieldError> {
        if name.trim().is_empty() {
            return Err(FieldError::Blank { field: Self::FIELD });
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(FieldError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Item description value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescription(String);

impl ItemDescription {
    const FIELD: &'static str = "description";

    pub fn new(description: String) -> Result<Self, FieldError> {
        if description.trim().is_empty() {
            return Err(FieldError::Blank { field: Self::FIELD });
        }

        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated fields of an item that has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: ItemName,
    pub description: ItemDescription,
}

impl NewItem {
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Unvalidated item fields as received from a caller.
///
/// Used for both create and full-replace update; `None` means the field was
/// absent from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    /// Validate every field, reporting all failures at once.
    ///
    /// # Errors
    /// * `Validation` - At least one field is missing or invalid
    pub fn validate(self) -> Result<NewItem, ItemError> {
        let name = self
            .name
            .ok_or(FieldError::Missing {
                field: ItemName::FIELD,
            })
            .and_then(ItemName::new);
        let description = self
            .description
            .ok_or(FieldError::Missing {
                field: ItemDescription::FIELD,
            })
            .and_then(ItemDescription::new);

        match (name, description) {
            (Ok(name), Ok(description)) => Ok(NewItem { name, description }),
            (name, description) => {
                let errors = [name.err(), description.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(ValidationErrors(errors).into())
            }
        }
    }
}
