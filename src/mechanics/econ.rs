/// Economy mechanics: affordability, supply headroom and income.

/// Minerals a worker gathers per simulated second.
pub const MINERALS_PER_WORKER: f64 = 0.7;

/// Gas a gas-extraction structure yields per simulated second.
pub const GAS_PER_EXTRACTOR: f64 = 0.2;

/// Supply cap added by each completed supply structure.
pub const SUPPLY_PER_STRUCTURE: u32 = 8;

/// Both stockpiles cover the cost.
#[inline]
pub fn affordable(minerals: f64, gas: f64, cost_minerals: f64, cost_gas: f64) -> bool {
    minerals >= cost_minerals && gas >= cost_gas
}

/// Committing `cost` more supply stays within `cap`.
#[inline]
pub fn has_headroom(supply: u32, cost: u32, cap: u32) -> bool {
    supply.saturating_add(cost) <= cap
}

/// Per-second income from `count` producers at `rate` each.
#[inline]
pub fn income(count: u32, rate: f64) -> f64 {
    f64::from(count) * rate
}
