// src/systems/sdk.rs

//! # Systems SDK
//!
//! Hook protocol for observing a [`Simulator`](crate::systems::simulator::Simulator)
//! while an evaluation runs.
//!
//! The simulator and evaluator are pure economy modeling: they never print,
//! and a fitness evaluation is just `order -> FitnessReport`. Everything a
//! caller might want to watch along the way (per-tick resources, build
//! timings) is exposed through [`Hook`] instead of
//! being baked into the simulation loop.
//!
//! ## When to write a hook
//! - Reporting intermediate ticks of one interesting build order.
//! - Test probes: asserting an invariant at every authorized build.
//! - Collecting timelines for a chart.
//!
//! Hooks are *observers*. They get shared references to the
//! [`EconomyState`] and cannot change the economy, so attaching hooks never
//! changes a fitness value.
//!
//! ## Call order within one tick
//! 1) `on_issue` if the held action was authorized (state already charged).
//! 2) `on_complete` for each direct entry and each queue entry that landed.
//! 3) `on_tick` once, after income.
//!
//! ## Determinism
//! Hooks must not draw from the search RNG; the search hands hooks nothing
//! random, and evaluations stay reproducible under a fixed seed.

use crate::systems::simulator::EconomyState;

/// Observer attached to a simulation run. Every method defaults to a no-op.
pub trait Hook {
    /// A build passed gating and was enqueued to finish at `completes_at`.
    fn on_issue(&mut self, _state: &EconomyState, _id: &str, _completes_at: u32) {}
    /// A pending entry resolved into a unit or building.
    fn on_complete(&mut self, _state: &EconomyState, _id: &str) {}
    /// The tick finished, income included.
    fn on_tick(&mut self, _state: &EconomyState) {}
}

/// Emits one `tracing` event per tick and per completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceHook;

impl Hook for TraceHook {
    fn on_issue(&mut self, state: &EconomyState, id: &str, completes_at: u32) {
        tracing::debug!(
            target: "build_finder::sim",
            time = state.time,
            action = id,
            completes_at,
            "build.issued"
        );
    }

    fn on_complete(&mut self, state: &EconomyState, id: &str) {
        tracing::debug!(
            target: "build_finder::sim",
            time = state.time,
            action = id,
            "build.completed"
        );
    }

    fn on_tick(&mut self, state: &EconomyState) {
        tracing::trace!(
            target: "build_finder::sim",
            time = state.time,
            minerals = state.minerals,
            gas = state.gas,
            supply = state.supply,
            supply_cap = state.supply_cap,
            "tick"
        );
    }
}
