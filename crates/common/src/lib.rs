//! Shared building blocks for the order management services.
//!
//! Everything here is deliberately small: typed identifiers, a money value
//! object, and the correlation id that ties a request together across
//! service boundaries.

pub mod correlation;
pub mod ids;
pub mod money;

pub use correlation::CorrelationId;
pub use ids::{ItemId, OrderId};
pub use money::Money;
