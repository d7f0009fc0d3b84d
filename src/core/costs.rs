//! Normalizes a cost with an arbitrary currency and billing cycle into a
//! canonical monthly figure in the base currency.

use crate::core::model::BillingCycle;
use crate::core::rates::RateMap;

/// Monthly cost in the base currency. Yearly and quarterly cycles are spread
/// evenly across their months.
pub fn monthly_in_base(
    cost: f64,
    currency: Option<&str>,
    cycle: BillingCycle,
    rates: &RateMap,
) -> f64 {
    let in_base = rates.to_base(cost, currency);
    match cycle {
        BillingCycle::Monthly => in_base,
        BillingCycle::Quarterly => in_base / 3.0,
        BillingCycle::Yearly => in_base / 12.0,
    }
}
