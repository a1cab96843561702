//! Shared types for the robot factory.
//!
//! The only resident is [`Outcome`], the success/failure container every
//! fulfillment step returns so that failures travel as data.

pub mod outcome;

pub use outcome::Outcome;
