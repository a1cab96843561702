//! Order fulfillment saga constants.

/// The saga type identifier for order fulfillment.
pub const SAGA_TYPE: &str = "RobotOrderFulfillment";

/// Step name: Resolve requested codes into priced catalog components.
pub const STEP_LOOKUP_COMPONENTS: &str = "lookup_components";

/// Step name: Check the one-part-per-category rule.
pub const STEP_VALIDATE_ROBOT: &str = "validate_robot";

/// Step name: Register the order in the manufacturing ledger.
pub const STEP_REGISTER_ORDER: &str = "register_order";

/// Step name: Subtract the requested parts from the catalog.
pub const STEP_SUBTRACT_COMPONENTS: &str = "subtract_components";

/// Compensation step name: Cancel the ledger registration.
pub const STEP_CANCEL_ORDER: &str = "cancel_order";
