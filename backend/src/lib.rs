//! Commons backend: a multi-tenant community platform.
//!
//! Requests flow route → validation schema → use case → repository port →
//! mapper → DTO. [`domain`] owns entities, use cases and ports;
//! [`inbound::http`] holds the Actix handlers; [`outbound`] provides the
//! PostgreSQL, in-memory and security adapters; [`server`] wires them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
