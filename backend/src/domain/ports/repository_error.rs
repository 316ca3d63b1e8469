//! Error reported by every driven persistence adapter.

use super::define_port_error;

define_port_error! {
    /// Failures raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } => "duplicate record: {message}",
    }
}

impl RepositoryError {
    /// Whether the failure came from a uniqueness constraint.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
