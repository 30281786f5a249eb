pub mod cache;
pub mod item;
pub mod user;
