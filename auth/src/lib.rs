//! Authentication utilities library
//!
//! Provides the credential and token plumbing used by the inventory service:
//! - Password hashing (Argon2id)
//! - Signed access/refresh JWT pairs
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, TokenLifetimes, TokenType};
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     TokenLifetimes::default(),
//! );
//!
//! let refresh_token = auth.issue(1, "alice", TokenType::Refresh).unwrap();
//!
//! // Exchange the refresh token for a fresh access token
//! let access_token = auth.refresh_access_token(&refresh_token).unwrap();
//! let claims = auth.validate(&access_token, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "1");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
