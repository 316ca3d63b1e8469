//! HTTP inbound adapter exposing REST endpoints.
//!
//! Each feature module carries its request schemas, response DTOs with their
//! `From<Entity>` mappers, and the handlers that glue them to a use case.

pub mod auth;
pub mod certificates;
pub mod channels;
pub mod comments;
pub mod communities;
pub mod courses;
pub mod error;
pub mod health;
pub mod lessons;
pub mod notifications;
pub mod paging;
pub mod payments;
pub mod posts;
pub mod progress;
pub mod routes;
pub mod schemas;
pub mod search;
pub mod session;
pub mod session_config;
pub mod spaces;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
