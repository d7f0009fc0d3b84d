//! Exchange rate abstractions: the provider seam, the request-scoped rate
//! map, and the static fallback used when the rate source is unreachable.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::core::model::Subscription;

/// Approximate rates into INR, used when the live source fails. Values only
/// need to be plausible; they must be deterministic.
const FALLBACK_RATES: &[(&str, f64)] = &[("USD", 83.0), ("EUR", 90.0), ("GBP", 105.0)];

/// Source of spot exchange rates.
///
/// Returns the raw base-relative table: 1 unit of `base` buys `table[code]`
/// units of `code`. Inversion into the canonical "1 unit of X = rate × base"
/// convention happens in [`get_rates_map`], never in providers.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_base_table(&self, base: &str) -> Result<HashMap<String, f64>>;
}

/// Request-scoped map from currency code to the factor converting one unit of
/// that currency into the base currency. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RateMap {
    base: String,
    rates: HashMap<String, f64>,
}

impl RateMap {
    /// A map that knows only the base currency itself.
    pub fn identity(base: &str) -> Self {
        Self {
            base: base.to_string(),
            rates: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, code: &str, rate: f64) -> Self {
        self.rates.insert(code.to_string(), rate);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rate for `code` into the base currency. Unknown codes convert 1:1.
    pub fn rate(&self, code: &str) -> f64 {
        if code == self.base {
            return 1.0;
        }
        self.rates.get(code).copied().unwrap_or(1.0)
    }

    /// Converts `amount` in `currency` into the base currency. A missing
    /// currency means the amount is already in the base currency.
    pub fn to_base(&self, amount: f64, currency: Option<&str>) -> f64 {
        amount * self.rate(currency.unwrap_or(&self.base))
    }
}

/// Distinct currency codes across a set of subscriptions, in first-seen
/// order. Records without a currency are priced in the base currency and
/// contribute nothing here.
pub fn distinct_currencies(subscriptions: &[Subscription]) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for sub in subscriptions {
        if let Some(currency) = sub.currency.as_deref() {
            let code = currency.trim();
            if !code.is_empty() && seen.insert(code.to_string()) {
                out.push(code.to_string());
            }
        }
    }
    out
}

/// Deterministic offline rates covering every requested code.
pub fn fallback_rates(base: &str, currencies: &[&str]) -> RateMap {
    let mut map = RateMap::identity(base);
    for code in currencies {
        let rate = FALLBACK_RATES
            .iter()
            .find(|(known, _)| known == code)
            .map_or(1.0, |(_, rate)| *rate);
        map.rates.insert(code.to_string(), rate);
    }
    map
}

/// Builds the rate map for one aggregation request.
///
/// Empty input, or input containing only the base currency, resolves without
/// touching the provider. A single batched fetch covers everything else; any
/// provider failure degrades to [`fallback_rates`] so aggregation always
/// completes.
pub async fn get_rates_map(
    provider: &dyn RateProvider,
    base: &str,
    currencies: &[String],
) -> RateMap {
    let mut requested: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for currency in currencies {
        let code = currency.trim();
        if code.is_empty() || code == base {
            continue;
        }
        if seen.insert(code) {
            requested.push(code);
        }
    }

    if requested.is_empty() {
        debug!("No foreign currencies requested, skipping rate fetch");
        return RateMap::identity(base);
    }

    match provider.fetch_base_table(base).await {
        Ok(table) => {
            let mut map = RateMap::identity(base);
            for code in requested {
                // table[code] is "units of code per 1 base"; invert it.
                let rate = table
                    .get(code)
                    .copied()
                    .filter(|r| r.is_finite() && *r > 0.0)
                    .map_or(1.0, |r| 1.0 / r);
                map.rates.insert(code.to_string(), rate);
            }
            map
        }
        Err(e) => {
            warn!("Rate fetch failed, using fallback rates: {e}");
            fallback_rates(base, &requested)
        }
    }
}
