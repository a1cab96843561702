//! Manufacturing ledger trait and in-memory implementation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use common::Outcome;
use domain::{DomainError, ManufacturedOrder, OrderId, Robot, UnableToProceedOrder};
use uuid::Uuid;

const STORE_NAME: &str = "manufacture ledger";

/// Strategy producing fresh order identifiers.
///
/// Any `Fn() -> OrderId` closure is a generator, which lets tests pin ids.
pub trait OrderIdGenerator: Send + Sync {
    fn next_id(&self) -> OrderId;
}

impl<F> OrderIdGenerator for F
where
    F: Fn() -> OrderId + Send + Sync,
{
    fn next_id(&self) -> OrderId {
        self()
    }
}

/// Random ids from UUID v4, rendered without hyphens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidOrderIdGenerator;

impl OrderIdGenerator for UuidOrderIdGenerator {
    fn next_id(&self) -> OrderId {
        OrderId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic ids of the form `<prefix>-0001`, `<prefix>-0002`, ...
#[derive(Debug)]
pub struct SequentialOrderIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialOrderIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl OrderIdGenerator for SequentialOrderIdGenerator {
    fn next_id(&self) -> OrderId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        OrderId::new(format!("{}-{:04}", self.prefix, n))
    }
}

/// Trait for the store of accepted manufacturing orders.
pub trait ManufactureRepository: Send + Sync {
    /// Registers an order for `robot` under a fresh id.
    fn add_order(&self, robot: Robot) -> Outcome<OrderId, DomainError>;

    /// Removes the order with `order_id`. Unknown ids are not an error.
    fn cancel_order(&self, order_id: &OrderId) -> Outcome<OrderId, DomainError>;

    /// Returns a copy of every stored order.
    fn fetch_orders(&self) -> Outcome<Vec<ManufacturedOrder>, DomainError>;
}

#[derive(Debug, Default)]
struct InMemoryManufactureState {
    orders: Vec<ManufacturedOrder>,
    fail_on_add: bool,
    fail_on_cancel: bool,
}

/// In-memory manufacturing ledger.
///
/// Cloning yields another handle to the same ledger.
#[derive(Clone)]
pub struct InMemoryManufactureRepository {
    state: Arc<RwLock<InMemoryManufactureState>>,
    id_generator: Arc<dyn OrderIdGenerator>,
}

impl InMemoryManufactureRepository {
    /// Creates an empty ledger.
    pub fn new(id_generator: impl OrderIdGenerator + 'static) -> Self {
        Self::with_orders(Vec::new(), id_generator)
    }

    /// Creates a ledger pre-populated with `orders`.
    pub fn with_orders(
        orders: Vec<ManufacturedOrder>,
        id_generator: impl OrderIdGenerator + 'static,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryManufactureState {
                orders,
                ..Default::default()
            })),
            id_generator: Arc::new(id_generator),
        }
    }

    /// Makes subsequent `add_order` calls fail as if the ledger were down.
    pub fn set_fail_on_add(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_add = fail;
    }

    /// Makes subsequent `cancel_order` calls fail as if the ledger were down.
    pub fn set_fail_on_cancel(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_cancel = fail;
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .orders
            .len()
    }

    /// Returns true if an order with `order_id` is stored.
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .orders
            .iter()
            .any(|o| &o.id == order_id)
    }
}

impl fmt::Debug for InMemoryManufactureRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryManufactureRepository")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ManufactureRepository for InMemoryManufactureRepository {
    fn add_order(&self, robot: Robot) -> Outcome<OrderId, DomainError> {
        let Ok(mut state) = self.state.write() else {
            tracing::error!(store = STORE_NAME, "lock poisoned during add");
            return unavailable();
        };

        if state.fail_on_add {
            return unavailable();
        }

        let order_id = self.id_generator.next_id();
        if state.orders.iter().any(|o| o.id == order_id) {
            tracing::error!(%order_id, "generated order id already registered");
            return Outcome::Failure(UnableToProceedOrder::duplicate_order_id(&order_id).into());
        }

        state
            .orders
            .push(ManufacturedOrder::new(order_id.clone(), robot));
        Outcome::Success(order_id)
    }

    fn cancel_order(&self, order_id: &OrderId) -> Outcome<OrderId, DomainError> {
        let Ok(mut state) = self.state.write() else {
            tracing::error!(store = STORE_NAME, "lock poisoned during cancel");
            return unavailable();
        };

        if state.fail_on_cancel {
            return unavailable();
        }

        state.orders.retain(|o| &o.id != order_id);
        Outcome::Success(order_id.clone())
    }

    fn fetch_orders(&self) -> Outcome<Vec<ManufacturedOrder>, DomainError> {
        match self.state.read() {
            Ok(state) => Outcome::Success(state.orders.clone()),
            Err(_) => unavailable(),
        }
    }
}

fn unavailable<T>() -> Outcome<T, DomainError> {
    Outcome::Failure(UnableToProceedOrder::store_unavailable(STORE_NAME).into())
}
