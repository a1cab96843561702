//! Domain layer for the robot factory.
//!
//! This crate provides:
//! - Parts, part categories, and priced catalog components
//! - The robot composition validator (exactly one part per category)
//! - Order values and exact decimal pricing
//! - The domain error taxonomy shared by every fulfillment step

pub mod error;
pub mod order;
pub mod robot;

pub use error::{
    DomainError, ErrorClass, InvalidRobotState, InvalidStockState, RobotError, StockError,
    UnableToProceedOrder,
};
pub use order::{ManufacturedOrder, Order, OrderId, OrderRequest, total_price};
pub use robot::{Component, Part, PartCategory, PartCode, Robot};
