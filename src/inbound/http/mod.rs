//! HTTP inbound adapter exposing REST endpoints.

pub mod courses;
pub mod error;
pub mod health;
pub mod state;

pub use error::ApiResult;
