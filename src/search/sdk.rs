// src/search/sdk.rs

//! # Search SDK
//!
//! A small generational harness for evolutionary searches, wired into the
//! crate's closed-loop driver [`refine_det`](crate::refine_det).
//!
//! ## The loop
//! One generation is one refinement step:
//! - **simulate**: score every member with your `fitness` closure.
//! - **measure**: stable-rank members by descending fitness and record
//!   [`GenerationStats`].
//! - **update**: carry the top [`ELITE_COUNT`] members over untouched, then
//!   fill the remaining slots with children from your `breed` closure.
//!
//! After the last generation the final population is scored and ranked once
//! more, so the caller gets the best member of the population it ends with,
//! not of the one before.
//!
//! ## Your responsibilities
//! 1) **fitness**: `&T -> Result<f64, E>`. Higher is better. Return `Err`
//!    only for out-of-domain failures; the harness stops at the first one
//!    and hands it back.
//! 2) **breed**: `&[Scored<T>] -> T`. Receives the whole ranked generation
//!    (best first). Selection, mutation and crossover all live here. Draw
//!    randomness from a generator you captured, never from ambient state.
//!
//! ## Guarantees
//! - Population size is constant across generations.
//! - Elites are cloned, never re-bred, so the best fitness recorded for
//!   generation `n + 1` is at least that of generation `n` whenever fitness
//!   is a pure function of the member.
//! - Ties keep their previous relative order (stable sort, no secondary key).

use std::cell::RefCell;

use serde::Serialize;

use crate::refine_det;

/// Members carried unchanged into the next generation.
pub const ELITE_COUNT: usize = 2;

/// A member with its fitness for the current generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Scored<T> {
    pub member: T,
    pub fitness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
}

/// Final ranked population plus one stats row per ranking performed
/// (`generations + 1` rows).
#[derive(Clone, Debug)]
pub struct Evolution<T> {
    pub ranked: Vec<Scored<T>>,
    pub history: Vec<GenerationStats>,
}

/// Stable sort, best first.
pub fn rank<T>(mut scored: Vec<Scored<T>>) -> Vec<Scored<T>> {
    scored.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    scored
}

pub fn stats<T>(generation: usize, ranked: &[Scored<T>]) -> GenerationStats {
    let best = ranked.first().map_or(0.0, |s| s.fitness);
    let mean = if ranked.is_empty() {
        0.0
    } else {
        ranked.iter().map(|s| s.fitness).sum::<f64>() / ranked.len() as f64
    };
    GenerationStats { generation, best, mean }
}

fn score_all<T: Clone, E>(
    population: &[T],
    fitness: &mut impl FnMut(&T) -> Result<f64, E>,
) -> Result<Vec<Scored<T>>, E> {
    population
        .iter()
        .map(|m| {
            Ok(Scored {
                member: m.clone(),
                fitness: fitness(m)?,
            })
        })
        .collect()
}

/// Runs `generations` rounds of score → rank → elitism + breeding.
pub fn evolve<T, E, Fit, Breed>(
    population: Vec<T>,
    generations: usize,
    mut fitness: Fit,
    mut breed: Breed,
) -> Result<Evolution<T>, E>
where
    T: Clone,
    Fit: FnMut(&T) -> Result<f64, E>,
    Breed: FnMut(&[Scored<T>]) -> T,
{
    let failure: RefCell<Option<E>> = RefCell::new(None);
    let mut history = Vec::with_capacity(generations.saturating_add(1));

    let simulate = |pop: &Vec<T>| -> Vec<Scored<T>> {
        match score_all(pop, &mut fitness) {
            Ok(scored) => scored,
            Err(e) => {
                *failure.borrow_mut() = Some(e);
                Vec::new()
            }
        }
    };

    let measure = |scored: &Vec<Scored<T>>| -> Vec<Scored<T>> {
        let ranked = rank(scored.clone());
        let row = stats(history.len(), &ranked);
        tracing::debug!(
            target: "build_finder::search",
            generation = row.generation,
            best = row.best,
            mean = row.mean,
            "generation.ranked"
        );
        history.push(row);
        ranked
    };

    let update = |pop: &Vec<T>, ranked: &Vec<Scored<T>>| -> Vec<T> {
        if ranked.is_empty() {
            return pop.clone();
        }
        let mut next: Vec<T> = ranked
            .iter()
            .take(ELITE_COUNT.min(pop.len()))
            .map(|s| s.member.clone())
            .collect();
        while next.len() < pop.len() {
            next.push(breed(ranked));
        }
        next
    };

    let stop = |_prev: &Vec<T>, _next: &Vec<T>| failure.borrow().is_some();

    let last = refine_det(population, simulate, measure, update, stop, generations);

    if let Some(e) = failure.into_inner() {
        return Err(e);
    }
    let ranked = rank(score_all(&last, &mut fitness)?);
    history.push(stats(history.len(), &ranked));

    Ok(Evolution { ranked, history })
}
