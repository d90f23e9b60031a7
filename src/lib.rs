/*!
`build_finder`: build-order search for a simplified RTS economy.

What it does
- Simulates a Protoss-style economy one second at a time: resources, supply,
  tech prerequisites, production queues (`systems::simulator`).
- Scores a build order by the total army DPS it fields at a target time
  (`systems::evaluator`).
- Evolves a population of build orders with elitism, mutation and crossover
  (`search`), driven by the closed-loop `refine_det` below.

How to use (call surface only)
- Take the embedded tables with `Catalog::builtin()` (or load your own JSON).
- Describe the run with a `SearchConfig` (defaults match the classic driver).
- Call `search::find_build_order(catalog, &cfg)` for a seeded run, or
  `search::find_build_order_with(catalog, &cfg, &mut rng)` to inject your RNG.

What it does NOT do
- No combat, pathing or real-time fidelity. No persistence.
*/

/// Deterministic refinement: θ_{t+1} = update(θ_t, measure(simulate(θ_t))).
///
/// Stops early when `converged(θ_t, θ_{t+1})` holds, otherwise after
/// `max_iters` steps.
pub fn refine_det<P, D, M, Sim, Meas, Upd, Conv>(
    mut theta: P,
    mut simulate: Sim,
    mut measure: Meas,
    mut update: Upd,
    converged: Conv,
    max_iters: usize,
) -> P
where
    Sim: FnMut(&P) -> D,
    Meas: FnMut(&D) -> M,
    Upd: FnMut(&P, &M) -> P,
    Conv: Fn(&P, &P) -> bool,
{
    for _ in 0..max_iters {
        let data = simulate(&theta);
        let pi = measure(&data);
        let theta_next = update(&theta, &pi);
        if converged(&theta, &theta_next) {
            return theta_next;
        }
        theta = theta_next;
    }
    theta
}

pub mod catalog;
pub mod error;
pub mod mechanics;
pub mod search;
pub mod systems;

pub use catalog::{Catalog, CatalogEntry, Kind};
pub use error::{CatalogError, ConfigError, SearchError};
pub use search::{SearchConfig, SearchOutcome};
pub use systems::evaluator::FitnessReport;
pub use systems::simulator::{EconomyState, Simulator};

/// An ordered sequence of action identifiers.
pub type BuildOrder = Vec<String>;
