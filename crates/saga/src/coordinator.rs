//! Saga coordinator for robot orders.

use std::time::Instant;

use common::Outcome;
use domain::{
    Component, DomainError, Order, OrderId, OrderRequest, Part, PartCode, Robot,
    UnableToProceedOrder, total_price,
};
use rust_decimal::Decimal;

use crate::order_fulfillment;
use crate::port::OrderPort;
use crate::services::manufacture::ManufactureRepository;
use crate::services::stock::StockRepository;

/// Orchestrates the order fulfillment saga.
///
/// The ledger registration is the provisional step and the catalog
/// subtraction is the commit. A failed commit cancels the registration and
/// the caller receives the stock error.
///
/// The cancellation is fire-and-forget: if it fails too, the failure is only
/// logged and counted, and the ledger keeps an order whose parts were never
/// taken from stock.
pub struct OrderCoordinator<S, M>
where
    S: StockRepository,
    M: ManufactureRepository,
{
    stock: S,
    manufacture: M,
}

/// A validated robot together with its price.
#[derive(Debug)]
struct EvaluatedOrder {
    robot: Robot,
    price: Decimal,
}

impl<S, M> OrderCoordinator<S, M>
where
    S: StockRepository,
    M: ManufactureRepository,
{
    /// Creates a new coordinator over the given catalog and ledger.
    pub fn new(stock: S, manufacture: M) -> Self {
        Self { stock, manufacture }
    }

    pub fn stock(&self) -> &S {
        &self.stock
    }

    pub fn manufacture(&self) -> &M {
        &self.manufacture
    }

    /// Steps 2 and 3: validate the composition and price it.
    fn evaluate(&self, components: Vec<Component>) -> Outcome<EvaluatedOrder, DomainError> {
        let parts: Vec<Part> = components.iter().map(|c| c.part().clone()).collect();

        Robot::from_parts(&parts)
            .widen::<DomainError>()
            .on_failure(|error| {
                tracing::info!(
                    step = order_fulfillment::STEP_VALIDATE_ROBOT,
                    %error,
                    "robot composition rejected"
                );
            })
            .chain(|robot| match total_price(&components) {
                Some(price) => Outcome::Success(EvaluatedOrder { robot, price }),
                None => {
                    tracing::warn!(
                        step = order_fulfillment::STEP_VALIDATE_ROBOT,
                        "order total overflowed"
                    );
                    Outcome::Failure(UnableToProceedOrder::price_overflow().into())
                }
            })
    }

    /// Steps 4 and 5: register in the ledger, then commit the stock.
    fn process(
        &self,
        evaluated: EvaluatedOrder,
        codes: &[PartCode],
    ) -> Outcome<Order, DomainError> {
        let EvaluatedOrder { robot, price } = evaluated;

        self.manufacture
            .add_order(robot)
            .on_failure(|error| {
                tracing::warn!(
                    step = order_fulfillment::STEP_REGISTER_ORDER,
                    %error,
                    "ledger registration failed"
                );
            })
            .map(|order_id| Order::new(order_id, price))
            .chain(|order| {
                tracing::debug!(
                    step = order_fulfillment::STEP_SUBTRACT_COMPONENTS,
                    order_id = %order.id,
                    "subtracting components"
                );
                self.stock
                    .reserve(codes)
                    .on_failure(|error| self.compensate(&order.id, error))
                    .map(|_| order)
            })
    }

    /// Cancels a ledger registration whose stock commit failed.
    fn compensate(&self, order_id: &OrderId, cause: &DomainError) {
        metrics::counter!("order_compensations_total").increment(1);
        tracing::warn!(
            step = order_fulfillment::STEP_CANCEL_ORDER,
            %order_id,
            %cause,
            "stock commit failed, cancelling order"
        );

        let _ = self.manufacture.cancel_order(order_id).on_failure(|error| {
            metrics::counter!("order_compensation_failures_total").increment(1);
            tracing::error!(
                step = order_fulfillment::STEP_CANCEL_ORDER,
                %order_id,
                %error,
                "compensation failed, ledger still holds the order"
            );
        });
    }
}

impl<S, M> OrderPort for OrderCoordinator<S, M>
where
    S: StockRepository,
    M: ManufactureRepository,
{
    #[tracing::instrument(
        skip(self, request),
        fields(saga_type = order_fulfillment::SAGA_TYPE, codes = request.codes.len())
    )]
    fn create(&self, request: OrderRequest) -> Outcome<Order, DomainError> {
        metrics::counter!("order_requests_total").increment(1);
        let started = Instant::now();

        let outcome = self
            .stock
            .lookup(&request.codes)
            .on_failure(|error| {
                tracing::info!(
                    step = order_fulfillment::STEP_LOOKUP_COMPONENTS,
                    %error,
                    "catalog lookup failed"
                );
            })
            .chain(|components| self.evaluate(components))
            .chain(|evaluated| self.process(evaluated, &request.codes));

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("order_duration_seconds").record(duration);

        match &outcome {
            Outcome::Success(order) => {
                metrics::counter!("orders_created_total").increment(1);
                tracing::info!(order_id = %order.id, price = %order.price, duration, "order created");
            }
            Outcome::Failure(error) => {
                metrics::counter!("orders_rejected_total", "reason" => error.kind()).increment(1);
                tracing::info!(
                    reason = error.kind(),
                    class = %error.class(),
                    duration,
                    "order not created"
                );
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::services::manufacture::{InMemoryManufactureRepository, SequentialOrderIdGenerator};
    use crate::services::stock::InMemoryStockRepository;
    use domain::{
        InvalidRobotState, InvalidStockState, ManufacturedOrder, PartCategory, RobotError,
        StockError,
    };
    use rust_decimal_macros::dec;

    /// Records every call and replays scripted answers.
    #[derive(Default)]
    struct ScriptedStock {
        lookup_answer: Mutex<Option<Outcome<Vec<Component>, DomainError>>>,
        reserve_answer: Mutex<Option<Outcome<Vec<PartCode>, DomainError>>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl StockRepository for ScriptedStock {
        fn lookup(&self, _codes: &[PartCode]) -> Outcome<Vec<Component>, DomainError> {
            self.calls.lock().unwrap().push("lookup");
            self.lookup_answer.lock().unwrap().take().unwrap()
        }

        fn reserve(&self, _codes: &[PartCode]) -> Outcome<Vec<PartCode>, DomainError> {
            self.calls.lock().unwrap().push("reserve");
            self.reserve_answer.lock().unwrap().take().unwrap()
        }
    }

    #[derive(Default)]
    struct ScriptedLedger {
        add_answer: Mutex<Option<Outcome<OrderId, DomainError>>>,
        cancel_fails: bool,
        calls: Mutex<Vec<String>>,
    }

    impl ManufactureRepository for ScriptedLedger {
        fn add_order(&self, _robot: Robot) -> Outcome<OrderId, DomainError> {
            self.calls.lock().unwrap().push("add".to_string());
            self.add_answer.lock().unwrap().take().unwrap()
        }

        fn cancel_order(&self, order_id: &OrderId) -> Outcome<OrderId, DomainError> {
            self.calls.lock().unwrap().push(format!("cancel {order_id}"));
            if self.cancel_fails {
                Outcome::Failure(UnableToProceedOrder::new("ledger down").into())
            } else {
                Outcome::Success(order_id.clone())
            }
        }

        fn fetch_orders(&self) -> Outcome<Vec<ManufacturedOrder>, DomainError> {
            Outcome::Success(vec![])
        }
    }

    fn correct_codes() -> Vec<PartCode> {
        ["A", "B", "C", "D"].into_iter().map(PartCode::new).collect()
    }

    fn correct_components() -> Vec<Component> {
        vec![
            Component::new(Part::face("A"), dec!(12.4), 5),
            Component::new(Part::arms("B"), dec!(24.1), 5),
            Component::new(Part::material("C"), dec!(5.1), 5),
            Component::new(Part::mobility("D"), dec!(100.25), 5),
        ]
    }

    fn scripted(
        lookup: Outcome<Vec<Component>, DomainError>,
        add: Option<Outcome<OrderId, DomainError>>,
        reserve: Option<Outcome<Vec<PartCode>, DomainError>>,
    ) -> OrderCoordinator<ScriptedStock, ScriptedLedger> {
        let stock = ScriptedStock::default();
        *stock.lookup_answer.lock().unwrap() = Some(lookup);
        *stock.reserve_answer.lock().unwrap() = reserve;
        let ledger = ScriptedLedger::default();
        *ledger.add_answer.lock().unwrap() = add;
        OrderCoordinator::new(stock, ledger)
    }

    fn stock_calls(c: &OrderCoordinator<ScriptedStock, ScriptedLedger>) -> Vec<&'static str> {
        c.stock().calls.lock().unwrap().clone()
    }

    fn ledger_calls(c: &OrderCoordinator<ScriptedStock, ScriptedLedger>) -> Vec<String> {
        c.manufacture().calls.lock().unwrap().clone()
    }

    #[test]
    fn test_lookup_failure_stops_the_saga() {
        let error: DomainError = InvalidStockState::new(vec![
            StockError::PartNotFound(PartCode::new("A")),
            StockError::PartNotFound(PartCode::new("B")),
        ])
        .into();
        let coordinator = scripted(Outcome::Failure(error.clone()), None, None);

        let result = coordinator.create(OrderRequest::new(correct_codes()));

        assert_eq!(result, Outcome::Failure(error));
        assert_eq!(stock_calls(&coordinator), vec!["lookup"]);
        assert!(ledger_calls(&coordinator).is_empty());
    }

    #[test]
    fn test_bad_composition_touches_nothing() {
        let components = vec![
            Component::new(Part::face("A"), dec!(12.4), 5),
            Component::new(Part::face("A"), dec!(12.4), 5),
            Component::new(Part::arms("B"), dec!(24.1), 5),
        ];
        let coordinator = scripted(Outcome::Success(components), None, None);

        let result = coordinator.create(OrderRequest::new(["A", "A", "C"]));

        assert_eq!(
            result,
            Outcome::Failure(
                InvalidRobotState::new(vec![
                    RobotError::TooManyOptionsForPart(PartCategory::Face),
                    RobotError::MissingMandatoryPart(PartCategory::Material),
                    RobotError::MissingMandatoryPart(PartCategory::Mobility),
                ])
                .into()
            )
        );
        assert_eq!(stock_calls(&coordinator), vec!["lookup"]);
        assert!(ledger_calls(&coordinator).is_empty());
    }

    #[test]
    fn test_ledger_failure_skips_stock_commit() {
        let error: DomainError = UnableToProceedOrder::new("some unexpected error").into();
        let coordinator = scripted(
            Outcome::Success(correct_components()),
            Some(Outcome::Failure(error.clone())),
            None,
        );

        let result = coordinator.create(OrderRequest::new(correct_codes()));

        assert_eq!(result, Outcome::Failure(error));
        assert_eq!(stock_calls(&coordinator), vec!["lookup"]);
        assert_eq!(ledger_calls(&coordinator), vec!["add"]);
    }

    #[test]
    fn test_successful_order_is_priced_exactly() {
        let coordinator = scripted(
            Outcome::Success(correct_components()),
            Some(Outcome::Success(OrderId::new("new-order"))),
            Some(Outcome::Success(correct_codes())),
        );

        let result = coordinator.create(OrderRequest::new(correct_codes()));

        assert_eq!(
            result,
            Outcome::Success(Order::new(OrderId::new("new-order"), dec!(141.85)))
        );
        assert_eq!(stock_calls(&coordinator), vec!["lookup", "reserve"]);
        assert_eq!(ledger_calls(&coordinator), vec!["add"]);
    }

    #[test]
    fn test_stock_commit_failure_cancels_order() {
        let error: DomainError =
            InvalidStockState::new(vec![StockError::PartNotAvailable(PartCode::new("A"))]).into();
        let coordinator = scripted(
            Outcome::Success(correct_components()),
            Some(Outcome::Success(OrderId::new("new-order"))),
            Some(Outcome::Failure(error.clone())),
        );

        let result = coordinator.create(OrderRequest::new(correct_codes()));

        assert_eq!(result, Outcome::Failure(error));
        assert_eq!(stock_calls(&coordinator), vec!["lookup", "reserve"]);
        assert_eq!(ledger_calls(&coordinator), vec!["add", "cancel new-order"]);
    }

    #[test]
    fn test_failed_compensation_still_reports_stock_error() {
        let error: DomainError =
            InvalidStockState::new(vec![StockError::PartNotAvailable(PartCode::new("D"))]).into();
        let stock = ScriptedStock::default();
        *stock.lookup_answer.lock().unwrap() = Some(Outcome::Success(correct_components()));
        *stock.reserve_answer.lock().unwrap() = Some(Outcome::Failure(error.clone()));
        let ledger = ScriptedLedger {
            cancel_fails: true,
            ..Default::default()
        };
        *ledger.add_answer.lock().unwrap() = Some(Outcome::Success(OrderId::new("kept")));
        let coordinator = OrderCoordinator::new(stock, ledger);

        let result = coordinator.create(OrderRequest::new(correct_codes()));

        assert_eq!(result, Outcome::Failure(error));
        assert_eq!(ledger_calls(&coordinator), vec!["add", "cancel kept"]);
    }

    #[test]
    fn test_price_overflow_touches_nothing() {
        let half = Decimal::MAX / dec!(2);
        let components = vec![
            Component::new(Part::face("A"), half, 5),
            Component::new(Part::arms("B"), half, 5),
            Component::new(Part::material("C"), half, 5),
            Component::new(Part::mobility("D"), half, 5),
        ];
        let coordinator = scripted(Outcome::Success(components), None, None);

        let result = coordinator.create(OrderRequest::new(correct_codes()));

        assert_eq!(
            result,
            Outcome::Failure(UnableToProceedOrder::price_overflow().into())
        );
        assert_eq!(stock_calls(&coordinator), vec!["lookup"]);
        assert!(ledger_calls(&coordinator).is_empty());
    }

    #[test]
    fn test_with_in_memory_collaborators() {
        let stock = InMemoryStockRepository::new(correct_components()).unwrap();
        let ledger = InMemoryManufactureRepository::new(SequentialOrderIdGenerator::new("ORD"));
        let coordinator = OrderCoordinator::new(stock.clone(), ledger.clone());

        let order = coordinator
            .create(OrderRequest::new(correct_codes()))
            .success()
            .unwrap();

        assert_eq!(order, Order::new(OrderId::new("ORD-0001"), dec!(141.85)));
        assert_eq!(ledger.order_count(), 1);
        for code in correct_codes() {
            assert_eq!(stock.available(&code), Some(4));
        }
    }
}
