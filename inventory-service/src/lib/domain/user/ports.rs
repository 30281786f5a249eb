use async_trait::async_trait;

use crate::domain::user::errors::TokenError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Port for signup, login and the authorization gate.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `PasswordHashing` / `DatabaseError` - Backend failure
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access/refresh pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, wrong password or inactive account
    /// * `PasswordHashing` / `TokenSigning` / `DatabaseError` - Backend failure
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, UserError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired or not a refresh token
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, UserError>;

    /// Resolve the identity behind a bearer access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired or not an access token
    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, UserError>;
}

/// Credential Store persistence.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new account.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve account by username.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}

/// Signs and verifies identity tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    fn issue(&self, user: &User) -> Result<TokenPair, TokenError>;

    fn refresh(&self, refresh_token: &str) -> Result<String, TokenError>;

    fn verify_access(&self, access_token: &str) -> Result<AuthenticatedUser, TokenError>;
}
