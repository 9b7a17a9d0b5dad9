//! Order status machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::OrderError;

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// (none) ──create──► Created ──enable──► Enabled
/// ```
///
/// Transitions are one-way; an enabled order never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order is stored but not yet visible downstream.
    #[default]
    Created,

    /// Order is visible/active (terminal state).
    Enabled,
}

impl OrderStatus {
    /// Returns true if the order can be enabled from this status.
    pub fn can_enable(&self) -> bool {
        matches!(self, OrderStatus::Created)
    }

    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Enabled)
    }

    /// Returns the status name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Enabled => "ENABLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "ENABLED" => Ok(OrderStatus::Enabled),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}
