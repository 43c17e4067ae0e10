//! Correlation ids for tracing a request across service boundaries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier carried on every request, log line and peer call belonging to
/// one logical operation.
///
/// The id enters the system through the `X-Correlation-ID` header. Edge
/// middleware generates a fresh one when the header is missing, so code
/// past the edge can rely on it being present and non-empty. It is always
/// passed as an explicit argument, never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Header name the id travels under, lowercase per HTTP/2 convention.
    pub const HEADER: &'static str = "x-correlation-id";

    /// Creates a correlation ID from an existing value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random correlation ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CorrelationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
