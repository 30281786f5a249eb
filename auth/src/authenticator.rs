use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenType;

/// Lifetimes of the two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(5),
            refresh: Duration::days(1),
        }
    }
}

/// Token facade: signs and checks access/refresh JWTs with fixed lifetimes.
pub struct Authenticator {
    jwt_handler: JwtHandler,
    lifetimes: TokenLifetimes,
}

impl Authenticator {
    /// Create a new authenticator signing with `jwt_secret`.
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            lifetimes,
        }
    }

    fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.lifetimes.access,
            TokenType::Refresh => self.lifetimes.refresh,
        }
    }

    /// Issue a signed token of `token_type` for `subject`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        subject: impl ToString,
        username: &str,
        token_type: TokenType,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(subject, username, token_type, self.lifetime(token_type));
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and check it is of the `expected` type.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its `exp`
    /// * `InvalidToken` - Signature or claims invalid
    /// * `WrongTokenType` - Valid token of the other kind
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType {
                expected: expected.as_str(),
                actual: claims.token_type.as_str(),
            });
        }

        Ok(claims)
    }

    /// Exchange a valid refresh token for a new access token.
    ///
    /// The refresh token itself stays valid until it expires.
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<String, JwtError> {
        let refresh = self.validate(refresh_token, TokenType::Refresh)?;
        let access = refresh.reissue(TokenType::Access, self.lifetime(TokenType::Access));

        self.jwt_handler.encode(&access)
    }
}
