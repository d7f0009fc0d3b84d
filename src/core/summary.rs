//! Aggregated statistics for the dashboard and subscription views.

use crate::core::costs::monthly_in_base;
use crate::core::model::{Idea, IdeaStatus, Subscription};
use crate::core::rates::RateMap;

/// Cost totals over a set of subscriptions, in the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub active_count: usize,
    pub total_monthly: f64,
    pub total_yearly: f64,
}

/// Sums active subscriptions into monthly and yearly totals.
///
/// The yearly figure is derived from the monthly one so the two can never
/// disagree. Empty or all-inactive input yields zero totals.
pub fn aggregate(subscriptions: &[Subscription], rates: &RateMap) -> CostSummary {
    let mut active_count = 0;
    let mut total_monthly = 0.0;

    for sub in subscriptions.iter().filter(|s| s.is_active()) {
        active_count += 1;
        total_monthly += monthly_in_base(sub.cost, sub.currency.as_deref(), sub.billing_cycle, rates);
    }

    CostSummary {
        active_count,
        total_monthly,
        total_yearly: total_monthly * 12.0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

pub fn idea_stats(ideas: &[Idea]) -> IdeaStats {
    IdeaStats {
        total: ideas.len(),
        active: ideas.iter().filter(|i| i.status == IdeaStatus::Active).count(),
        completed: ideas
            .iter()
            .filter(|i| i.status == IdeaStatus::Completed)
            .count(),
    }
}
