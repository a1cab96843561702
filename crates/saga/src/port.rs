//! Inbound port for placing orders.

use common::Outcome;
use domain::{DomainError, Order, OrderRequest};

/// The single operation the fulfillment core exposes to delivery layers.
pub trait OrderPort: Send + Sync {
    /// Builds, prices and registers a robot for the requested part codes.
    fn create(&self, request: OrderRequest) -> Outcome<Order, DomainError>;
}
