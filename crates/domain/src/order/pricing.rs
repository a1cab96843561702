use rust_decimal::Decimal;

use crate::robot::Component;

/// Sums the unit prices of `components` in decimal arithmetic.
///
/// Returns `None` when the sum leaves the `Decimal` range.
pub fn total_price(components: &[Component]) -> Option<Decimal> {
    components
        .iter()
        .try_fold(Decimal::ZERO, |total, c| total.checked_add(c.price()))
}
