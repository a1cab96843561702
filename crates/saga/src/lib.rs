//! Saga pattern implementation for robot order fulfillment.
//!
//! The order fulfillment saga follows these steps:
//! 1. Look up the requested parts in the catalog
//! 2. Validate the robot composition and compute the price
//! 3. Register the order in the manufacturing ledger
//! 4. Subtract the parts from the catalog
//!
//! If step 4 fails, the ledger registration from step 3 is cancelled.

pub mod coordinator;
pub mod order_fulfillment;
pub mod port;
pub mod services;

pub use coordinator::OrderCoordinator;
pub use port::OrderPort;
pub use services::{
    CatalogError, InMemoryManufactureRepository, InMemoryStockRepository, ManufactureRepository,
    OrderIdGenerator, SequentialOrderIdGenerator, StockRepository, UuidOrderIdGenerator,
};
