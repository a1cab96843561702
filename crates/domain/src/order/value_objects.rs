//! Value objects for the order domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::robot::{PartCode, Robot};

/// Opaque identifier of a manufacturing order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an order ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A request to build one robot from the given part codes.
///
/// Codes are kept in request order; duplicates are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub codes: Vec<PartCode>,
}

impl OrderRequest {
    pub fn new<I, C>(codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<PartCode>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }
}

/// An order accepted by the manufacturing ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturedOrder {
    pub id: OrderId,
    pub robot: Robot,
}

impl ManufacturedOrder {
    pub fn new(id: OrderId, robot: Robot) -> Self {
        Self { id, robot }
    }
}

/// The confirmed order returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Exact sum of the unit prices of the requested parts.
    pub price: Decimal,
}

impl Order {
    pub fn new(id: OrderId, price: Decimal) -> Self {
        Self { id, price }
    }
}
