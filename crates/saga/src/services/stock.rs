//! Parts catalog trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use common::Outcome;
use domain::{Component, DomainError, InvalidStockState, PartCode, StockError, UnableToProceedOrder};
use rust_decimal::Decimal;
use thiserror::Error;

const STORE_NAME: &str = "stock store";

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two catalog entries share a code.
    #[error("Duplicate part code in catalog: {0}")]
    DuplicateCode(PartCode),

    /// A catalog entry has a price below zero.
    #[error("Negative price for part {0}")]
    NegativePrice(PartCode),
}

/// Trait for the priced, quantified parts catalog.
///
/// Both operations accept codes in request order, duplicates allowed. Results
/// are copies; callers can never reach the stored components.
pub trait StockRepository: Send + Sync {
    /// Resolves every requested code into a component copy, one per requested
    /// code. Quantities are not checked.
    ///
    /// Fails with one `PartNotFound` per distinct unknown code.
    fn lookup(&self, codes: &[PartCode]) -> Outcome<Vec<Component>, DomainError>;

    /// Subtracts one unit per occurrence of each code, all or nothing.
    ///
    /// Every distinct code is checked before anything changes; the failure
    /// lists all unknown and insufficient codes.
    fn reserve(&self, codes: &[PartCode]) -> Outcome<Vec<PartCode>, DomainError>;
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    components: Vec<Component>,
}

impl InMemoryStockState {
    fn find(&self, code: &PartCode) -> Option<&Component> {
        self.components.iter().find(|c| c.code() == code)
    }

    fn find_mut(&mut self, code: &PartCode) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.code() == code)
    }
}

/// In-memory parts catalog.
///
/// Cloning yields another handle to the same catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockRepository {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl InMemoryStockRepository {
    /// Creates a catalog from its initial components.
    pub fn new(components: Vec<Component>) -> Result<Self, CatalogError> {
        let mut seen: Vec<&PartCode> = Vec::with_capacity(components.len());
        for component in &components {
            if seen.contains(&component.code()) {
                return Err(CatalogError::DuplicateCode(component.code().clone()));
            }
            if component.price() < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(component.code().clone()));
            }
            seen.push(component.code());
        }

        Ok(Self {
            state: Arc::new(RwLock::new(InMemoryStockState { components })),
        })
    }

    /// Returns the units available for `code`, if the code exists.
    pub fn available(&self, code: &PartCode) -> Option<u32> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .find(code)
            .map(Component::available)
    }

    /// Returns a copy of every catalog entry.
    pub fn snapshot(&self) -> Vec<Component> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .components
            .clone()
    }
}

impl StockRepository for InMemoryStockRepository {
    fn lookup(&self, codes: &[PartCode]) -> Outcome<Vec<Component>, DomainError> {
        let Ok(state) = self.state.read() else {
            tracing::error!(store = STORE_NAME, "lock poisoned during lookup");
            return unavailable();
        };

        let mut found = Vec::with_capacity(codes.len());
        let mut errors: Vec<StockError> = Vec::new();
        for code in codes {
            match state.find(code) {
                Some(component) => found.push(component.clone()),
                None => {
                    let error = StockError::PartNotFound(code.clone());
                    if !errors.contains(&error) {
                        errors.push(error);
                    }
                }
            }
        }

        if errors.is_empty() {
            Outcome::Success(found)
        } else {
            tracing::debug!(?errors, "catalog lookup failed");
            Outcome::Failure(InvalidStockState::new(errors).into())
        }
    }

    fn reserve(&self, codes: &[PartCode]) -> Outcome<Vec<PartCode>, DomainError> {
        // The write guard spans both the check and the decrement.
        let Ok(mut state) = self.state.write() else {
            tracing::error!(store = STORE_NAME, "lock poisoned during reservation");
            return unavailable();
        };

        let demand = count_codes(codes);
        let errors: Vec<StockError> = demand
            .iter()
            .filter_map(|(code, quantity)| match state.find(code) {
                None => Some(StockError::PartNotFound(code.clone())),
                Some(component) if *quantity > component.available() => {
                    Some(StockError::PartNotAvailable(code.clone()))
                }
                Some(_) => None,
            })
            .collect();

        if !errors.is_empty() {
            tracing::info!(?errors, "stock reservation rejected");
            return Outcome::Failure(InvalidStockState::new(errors).into());
        }

        for (code, quantity) in &demand {
            if let Some(component) = state.find_mut(code) {
                *component = component.with_subtracted(*quantity);
            }
        }

        Outcome::Success(codes.to_vec())
    }
}

/// Counts occurrences per distinct code, in order of first appearance.
fn count_codes(codes: &[PartCode]) -> Vec<(PartCode, u32)> {
    let mut index: HashMap<&PartCode, usize> = HashMap::new();
    let mut counts: Vec<(PartCode, u32)> = Vec::new();
    for code in codes {
        match index.get(code) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(code, counts.len());
                counts.push((code.clone(), 1));
            }
        }
    }
    counts
}

fn unavailable<T>() -> Outcome<T, DomainError> {
    Outcome::Failure(UnableToProceedOrder::store_unavailable(STORE_NAME).into())
}
