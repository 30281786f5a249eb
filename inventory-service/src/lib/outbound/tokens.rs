use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use auth::TokenType;

use crate::domain::user::errors::TokenError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::TokenIssuer;

/// `TokenIssuer` backed by the shared HS256 authenticator.
pub struct JwtTokenIssuer {
    authenticator: Arc<Authenticator>,
}

impl JwtTokenIssuer {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => TokenError::Expired,
            JwtError::EncodingFailed(reason) => TokenError::Signing(reason),
            JwtError::InvalidToken(_) | JwtError::WrongTokenType { .. } => {
                TokenError::Invalid(err.to_string())
            }
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<TokenPair, TokenError> {
        let username = user.username.as_str();

        Ok(TokenPair {
            access_token: self
                .authenticator
                .issue(user.id, username, TokenType::Access)?,
            refresh_token: self
                .authenticator
                .issue(user.id, username, TokenType::Refresh)?,
        })
    }

    fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        Ok(self.authenticator.refresh_access_token(refresh_token)?)
    }

    fn verify_access(&self, access_token: &str) -> Result<AuthenticatedUser, TokenError> {
        let claims = self.authenticator.validate(access_token, TokenType::Access)?;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| TokenError::Invalid(format!("Malformed subject: {}", claims.sub)))?;

        Ok(AuthenticatedUser {
            user_id,
            username: claims.username.unwrap_or_default(),
        })
    }
}
