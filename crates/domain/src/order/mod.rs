//! Order values and pricing.

mod pricing;
mod value_objects;

pub use pricing::total_price;
pub use value_objects::{ManufacturedOrder, Order, OrderId, OrderRequest};
