//! Build-order search: the generational harness with build orders as members
//! and army DPS at the target time as fitness.

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};
use serde::Serialize;

use crate::BuildOrder;
use crate::catalog::Catalog;
use crate::error::SearchError;
use crate::mechanics::stoch;
use crate::search::config::SearchConfig;
use crate::search::sdk::{GenerationStats, Scored, evolve};
use crate::systems::evaluator::{FitnessReport, evaluate};
use crate::systems::genetic;

#[derive(Clone, Debug, Serialize)]
pub struct SearchOutcome {
    pub best: BuildOrder,
    pub report: FitnessReport,
    pub history: Vec<GenerationStats>,
}

/// Seeded run: `WyRand` from `cfg.seed`.
pub fn find_build_order(catalog: &Catalog, cfg: &SearchConfig) -> Result<SearchOutcome, SearchError> {
    let mut rng = WyRand::from_seed(cfg.seed.to_le_bytes());
    find_build_order_with(catalog, cfg, &mut rng)
}

/// Run with a caller-supplied generator. Every random draw of the search
/// (initial orders, coin flips, parent picks, cut points) comes from `rng`.
pub fn find_build_order_with<R: RngCore + ?Sized>(
    catalog: &Catalog,
    cfg: &SearchConfig,
    rng: &mut R,
) -> Result<SearchOutcome, SearchError> {
    cfg.validate(catalog)?;

    let population: Vec<BuildOrder> = (0..cfg.population_size)
        .map(|_| genetic::random_order(rng, &cfg.vocabulary, cfg.order_length))
        .collect();

    let evolution = evolve(
        population,
        cfg.generations,
        |order: &BuildOrder| evaluate(catalog, order, cfg.target_time).map(|r| r.total_dps),
        |ranked: &[Scored<BuildOrder>]| breed(rng, ranked, cfg),
    )?;

    let best = evolution
        .ranked
        .into_iter()
        .next()
        .map(|s| s.member)
        .ok_or(SearchError::EmptyPopulation)?;
    let report = evaluate(catalog, &best, cfg.target_time)?;

    tracing::info!(
        target: "build_finder::search",
        generations = cfg.generations,
        target_time = cfg.target_time,
        total_dps = report.total_dps,
        total_supply = report.total_supply,
        "search.finished"
    );

    Ok(SearchOutcome {
        best,
        report,
        history: evolution.history,
    })
}

/// One child: a mutant of a random member with probability
/// `cfg.mutation_rate`, otherwise a crossover of two random members.
fn breed<R: RngCore + ?Sized>(
    rng: &mut R,
    ranked: &[Scored<BuildOrder>],
    cfg: &SearchConfig,
) -> BuildOrder {
    if stoch::bernoulli(rng, cfg.mutation_rate) {
        match stoch::choose(rng, ranked) {
            Some(parent) => genetic::mutate(rng, &parent.member, &cfg.vocabulary),
            None => Vec::new(),
        }
    } else {
        let a = stoch::choose(rng, ranked);
        let b = stoch::choose(rng, ranked);
        match (a, b) {
            (Some(a), Some(b)) => genetic::crossover(rng, &a.member, &b.member),
            _ => Vec::new(),
        }
    }
}
