use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::TokenIssuer;
use crate::domain::user::ports::UserRepository;

/// Domain service for accounts and tokens.
///
/// Composes credential verification (repository + Argon2) with token
/// signing (`TokenIssuer`); neither knows about the other.
pub struct AuthService<UR, TI>
where
    UR: UserRepository,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    token_issuer: Arc<TI>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, TI> AuthService<UR, TI>
where
    UR: UserRepository,
    TI: TokenIssuer,
{
    pub fn new(repository: Arc<UR>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Returns the account only if the password matches and it is active.
    async fn verify_credentials(&self, command: &LoginCommand) -> Result<User, UserError> {
        let Ok(username) = Username::new(command.username.clone()) else {
            self.password_hasher.verify_against_nothing(&command.password);
            return Err(UserError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            self.password_hasher.verify_against_nothing(&command.password);
            return Err(UserError::InvalidCredentials);
        };

        let matches = self
            .password_hasher
            .verify(&command.password, &user.password_hash)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        if matches && user.is_active {
            Ok(user)
        } else {
            Err(UserError::InvalidCredentials)
        }
    }
}

#[async_trait]
impl<UR, TI> AuthServicePort for AuthService<UR, TI>
where
    UR: UserRepository,
    TI: TokenIssuer,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.expose())
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if let UserError::DatabaseError(reason) = e {
                    tracing::error!(operation = "signup", error = %reason, "Failed to persist user");
                }
            })?;

        tracing::info!(user_id = user.id.0, username = %user.username, "User created");
        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, UserError> {
        let user = match self.verify_credentials(&command).await {
            Ok(user) => user,
            Err(UserError::InvalidCredentials) => {
                tracing::warn!(username = %command.username, "Invalid credentials");
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(operation = "login", error = %e, "Credential verification failed");
                return Err(e);
            }
        };

        let tokens = self.token_issuer.issue(&user)?;
        tracing::info!(user_id = user.id.0, username = %user.username, "User logged in");

        Ok(tokens)
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, UserError> {
        self.token_issuer.refresh(refresh_token).map_err(|e| {
            tracing::warn!(error = %e, "Refresh token rejected");
            UserError::from(e)
        })
    }

    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, UserError> {
        self.token_issuer.verify_access(access_token).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            UserError::from(e)
        })
    }
}
