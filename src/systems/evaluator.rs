//! Build order + target time → fitness report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::systems::sdk::Hook;
use crate::systems::simulator::{EconomyState, Simulator};

/// The held action is re-attempted on every tick of its duration, so cheap
/// units can be issued several times per step when income allows. Set to
/// `false` to issue once per step and wait out the rest.
pub const REISSUE_HELD_ACTION: bool = true;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    pub total_dps: f64,
    pub total_supply: u32,
    pub units: BTreeMap<String, u32>,
}

/// Drives a fresh simulator through `order`, stopping as soon as simulated
/// time reaches `target_time`, and returns the final state.
pub fn run(
    catalog: &Catalog,
    order: &[String],
    target_time: u32,
    hooks: &mut [Box<dyn Hook>],
) -> EconomyState {
    let mut sim = Simulator::new(catalog);
    'order: for action in order {
        let duration = catalog.action_time(action);
        for step in 0..duration {
            let held = (REISSUE_HELD_ACTION || step == 0).then_some(action.as_str());
            sim.tick_with(held, hooks);
            if sim.state().time >= target_time {
                break 'order;
            }
        }
    }
    sim.into_state()
}

/// Total DPS (missing DPS counts as zero) and total supply of `units`.
pub fn summarize(
    catalog: &Catalog,
    units: &BTreeMap<String, u32>,
) -> Result<FitnessReport, CatalogError> {
    let mut total_dps = 0.0;
    let mut total_supply = 0u32;
    for (id, &count) in units {
        let entry = catalog.entry(id)?;
        total_dps += entry.dps_or_zero() * f64::from(count);
        total_supply = total_supply.saturating_add(entry.supply.saturating_mul(count));
    }
    Ok(FitnessReport {
        total_dps,
        total_supply,
        units: units.clone(),
    })
}

pub fn evaluate(
    catalog: &Catalog,
    order: &[String],
    target_time: u32,
) -> Result<FitnessReport, CatalogError> {
    evaluate_with_hooks(catalog, order, target_time, &mut [])
}

pub fn evaluate_with_hooks(
    catalog: &Catalog,
    order: &[String],
    target_time: u32,
    hooks: &mut [Box<dyn Hook>],
) -> Result<FitnessReport, CatalogError> {
    let state = run(catalog, order, target_time, hooks);
    summarize(catalog, &state.units)
}
