//! Domain error types.
//!
//! Errors are plain values: every fulfillment step returns them inside an
//! [`Outcome`](common::Outcome) instead of unwinding.

use std::fmt;

use thiserror::Error;

use crate::order::OrderId;
use crate::robot::{PartCategory, PartCode};

/// A single violation of the one-part-per-category rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RobotError {
    /// More than one part was supplied for a category.
    #[error("too many options for {0} part")]
    TooManyOptionsForPart(PartCategory),

    /// No part was supplied for a category.
    #[error("missing mandatory {0} part")]
    MissingMandatoryPart(PartCategory),
}

/// A single catalog violation for one part code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum StockError {
    /// The code exists but not enough units are available.
    #[error("part {0} not available")]
    PartNotAvailable(PartCode),

    /// The code is not in the catalog.
    #[error("part {0} not found")]
    PartNotFound(PartCode),
}

impl StockError {
    /// Returns the part code the violation refers to.
    pub fn code(&self) -> &PartCode {
        match self {
            StockError::PartNotAvailable(code) | StockError::PartNotFound(code) => code,
        }
    }
}

/// The requested parts do not form a valid robot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid robot composition: {}", join(.errors))]
pub struct InvalidRobotState {
    pub errors: Vec<RobotError>,
}

impl InvalidRobotState {
    pub fn new(errors: Vec<RobotError>) -> Self {
        Self { errors }
    }
}

/// The catalog cannot serve the requested codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid stock state: {}", join(.errors))]
pub struct InvalidStockState {
    pub errors: Vec<StockError>,
}

impl InvalidStockState {
    pub fn new(errors: Vec<StockError>) -> Self {
        Self { errors }
    }
}

/// The manufacturing ledger could not process the order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to proceed order: {reason}")]
pub struct UnableToProceedOrder {
    pub reason: String,
}

impl UnableToProceedOrder {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The backing store could not be accessed.
    pub fn store_unavailable(store: &str) -> Self {
        Self::new(format!("{store} unavailable"))
    }

    /// The order total does not fit the decimal range.
    pub fn price_overflow() -> Self {
        Self::new("order total exceeds the supported price range")
    }

    /// The id generator produced an id the ledger already holds.
    pub fn duplicate_order_id(order_id: &OrderId) -> Self {
        Self::new(format!("order id {order_id} already registered"))
    }
}

/// How the caller should react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The request itself is wrong; fix it and resubmit.
    Rejected,
    /// The system could not proceed right now; retry later.
    Transient,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Rejected => "rejected",
            ErrorClass::Transient => "transient",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can end an order request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Composition violations for the requested parts.
    #[error(transparent)]
    InvalidRobot(#[from] InvalidRobotState),

    /// Unknown or insufficient catalog codes.
    #[error(transparent)]
    InvalidStock(#[from] InvalidStockState),

    /// Ledger failure.
    #[error(transparent)]
    UnableToProceed(#[from] UnableToProceedOrder),
}

impl DomainError {
    /// Returns the failure class the boundary should report.
    pub fn class(&self) -> ErrorClass {
        match self {
            DomainError::InvalidRobot(_) | DomainError::InvalidStock(_) => ErrorClass::Rejected,
            DomainError::UnableToProceed(_) => ErrorClass::Transient,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InvalidRobot(_) => "robot_composition",
            DomainError::InvalidStock(_) => "stock",
            DomainError::UnableToProceed(_) => "manufacture",
        }
    }

    /// Renders each individual violation as a message.
    pub fn violations(&self) -> Vec<String> {
        match self {
            DomainError::InvalidRobot(state) => {
                state.errors.iter().map(ToString::to_string).collect()
            }
            DomainError::InvalidStock(state) => {
                state.errors.iter().map(ToString::to_string).collect()
            }
            DomainError::UnableToProceed(err) => vec![err.reason.clone()],
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "no details".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
