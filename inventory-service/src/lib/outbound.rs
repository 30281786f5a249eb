pub mod cache;
pub mod repositories;
pub mod tokens;

pub use cache::InMemoryCacheStore;
pub use tokens::JwtTokenIssuer;
