use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username: this field is required")]
    Missing,

    #[error("username: this field may not be blank")]
    Blank,

    #[error("username: ensure this field has no more than {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("username: only letters, digits and @/./+/-/_ characters are allowed")]
    InvalidCharacters,
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password: this field is required")]
    Missing,

    #[error("password: this field may not be blank")]
    Blank,
}

/// Error raised by a token issuer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Top-level error for signup, login and token operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    #[error("A user with that username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<TokenError> for UserError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid(_) => UserError::Unauthorized(err.to_string()),
            TokenError::Signing(reason) => UserError::TokenSigning(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_conversion() {
        assert!(matches!(
            UserError::from(TokenError::Expired),
            UserError::Unauthorized(_)
        ));
        assert!(matches!(
            UserError::from(TokenError::Invalid("bad signature".to_string())),
            UserError::Unauthorized(_)
        ));
        assert!(matches!(
            UserError::from(TokenError::Signing("no key".to_string())),
            UserError::TokenSigning(_)
        ));
    }
}
