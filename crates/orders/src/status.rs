//! Order lifecycle statuses.
//!
//! ```text
//! new -> processing -> shipped -> out for delivery -> delivered
//!                                                         |
//!                                     returned <- return placed
//! ```
//!
//! Statuses travel on the wire as the lowercase strings shown above,
//! spaces included. Parsing is exact: no trimming, no case folding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Where an order currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Just placed and not yet picked up by fulfillment. The only status
    /// an order may be created with.
    #[default]
    #[serde(rename = "new")]
    New,
    /// Picked up by fulfillment.
    #[serde(rename = "processing")]
    Processing,
    /// Handed to the carrier.
    #[serde(rename = "shipped")]
    Shipped,
    /// On the last leg to the customer.
    #[serde(rename = "out for delivery")]
    OutForDelivery,
    /// Arrived at the customer.
    #[serde(rename = "delivered")]
    Delivered,
    /// The customer asked to send the order back.
    #[serde(rename = "return placed")]
    ReturnPlaced,
    /// Back in the warehouse.
    #[serde(rename = "returned")]
    Returned,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::New,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::ReturnPlaced,
        OrderStatus::Returned,
    ];

    /// Check if an order may be created with this status.
    pub fn is_valid_for_creation(&self) -> bool {
        matches!(self, OrderStatus::New)
    }

    /// The wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::OutForDelivery => "out for delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::ReturnPlaced => "return placed",
            OrderStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}
