//! Collaborator traits and in-memory implementations for saga steps.

pub mod manufacture;
pub mod stock;

pub use manufacture::{
    InMemoryManufactureRepository, ManufactureRepository, OrderIdGenerator,
    SequentialOrderIdGenerator, UuidOrderIdGenerator,
};
pub use stock::{CatalogError, InMemoryStockRepository, StockRepository};
