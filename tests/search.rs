// tests/search.rs
use build_finder::catalog::Catalog;
use build_finder::search::sdk::{ELITE_COUNT, Scored, evolve, rank};
use build_finder::search::{
    DEFAULT_VOCABULARY, SearchConfig, find_build_order, find_build_order_with,
};
use build_finder::systems::evaluator::evaluate;
use build_finder::systems::genetic::{crossover, mutate, random_order};
use build_finder::{BuildOrder, SearchError};
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use bevy_prng::WyRand;
use rand_core::SeedableRng;

fn vocabulary() -> Vec<String> {
    DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect()
}

fn rng(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

fn small_config() -> SearchConfig {
    SearchConfig {
        target_time: 420,
        population_size: 8,
        generations: 6,
        order_length: 12,
        seed: 42,
        ..SearchConfig::default()
    }
}

/* ──────────────────────────────────────────────────────────────────────────
1) Variation operators
────────────────────────────────────────────────────────────────────────── */

#[test]
fn random_order_draws_from_vocabulary() {
    let vocab = vocabulary();
    let mut r = rng(1);
    let order = random_order(&mut r, &vocab, 40);
    assert_eq!(order.len(), 40);
    assert!(order.iter().all(|a| vocab.contains(a)));
    assert!(random_order(&mut r, &[], 5).is_empty());
}

#[test]
fn mutate_changes_at_most_one_position() {
    let vocab = vocabulary();
    let mut r = rng(2);
    for _ in 0..200 {
        let parent = random_order(&mut r, &vocab, 20);
        let child = mutate(&mut r, &parent, &vocab);
        assert_eq!(child.len(), parent.len());
        let diffs = parent.iter().zip(&child).filter(|(a, b)| a != b).count();
        assert!(diffs <= 1, "mutation touched {diffs} positions");
    }
}

#[test]
fn mutate_leaves_the_parent_alone() {
    let vocab = vocabulary();
    let mut r = rng(3);
    let parent = random_order(&mut r, &vocab, 10);
    let snapshot = parent.clone();
    for _ in 0..50 {
        let _ = mutate(&mut r, &parent, &vocab);
    }
    assert_eq!(parent, snapshot);
}

#[test]
fn crossover_with_itself_is_identity() {
    let vocab = vocabulary();
    let mut r = rng(4);
    for _ in 0..100 {
        let a = random_order(&mut r, &vocab, 15);
        assert_eq!(crossover(&mut r, &a, &a), a);
    }
}

#[test]
fn crossover_is_prefix_of_a_then_suffix_of_b() {
    let a: BuildOrder = (0..10).map(|i| format!("a{i}")).collect();
    let b: BuildOrder = (0..10).map(|i| format!("b{i}")).collect();
    let mut r = rng(5);
    for _ in 0..100 {
        let child = crossover(&mut r, &a, &b);
        assert_eq!(child.len(), 10);
        let cut = child.iter().take_while(|g| g.starts_with('a')).count();
        assert!(cut < 10, "cut is drawn from 0..len");
        assert_eq!(&child[..cut], &a[..cut]);
        assert_eq!(&child[cut..], &b[cut..]);
    }
}

/* ──────────────────────────────────────────────────────────────────────────
2) Generational harness
────────────────────────────────────────────────────────────────────────── */

#[test]
fn rank_is_stable_for_ties() {
    let scored = vec![
        Scored { member: "first", fitness: 1.0 },
        Scored { member: "best", fitness: 3.0 },
        Scored { member: "second", fitness: 1.0 },
    ];
    let ranked: Vec<&str> = rank(scored).into_iter().map(|s| s.member).collect();
    assert_eq!(ranked, vec!["best", "first", "second"]);
}

#[test]
fn evolve_keeps_size_and_elites() {
    // Members are integers; fitness is the value; breeding only produces 0.
    let evolution = evolve(
        vec![5, 9, 1, 7],
        3,
        |m: &i32| Ok::<f64, Infallible>(f64::from(*m)),
        |_ranked: &[Scored<i32>]| 0,
    )
    .expect("infallible");

    let members: Vec<i32> = evolution.ranked.iter().map(|s| s.member).collect();
    assert_eq!(members, vec![9, 7, 0, 0]);
    assert_eq!(evolution.history.len(), 4);
    assert!(evolution.history.iter().all(|h| h.best == 9.0));
    assert_eq!(ELITE_COUNT, 2);
}

#[test]
fn evolve_stops_on_first_fitness_error() {
    let calls = Rc::new(RefCell::new(0usize));
    let result = evolve(
        vec![1, 2, 3],
        10,
        {
            let calls = Rc::clone(&calls);
            move |m: &i32| {
                *calls.borrow_mut() += 1;
                if *m == 2 { Err("bad member") } else { Ok(1.0) }
            }
        },
        |_ranked: &[Scored<i32>]| 2,
    );
    assert_eq!(result.err(), Some("bad member"));
    assert_eq!(*calls.borrow(), 2, "scoring continued past the failure");
}

/* ──────────────────────────────────────────────────────────────────────────
3) Build-order search
────────────────────────────────────────────────────────────────────────── */

#[test]
fn best_fitness_never_drops_between_generations() {
    let outcome = find_build_order(Catalog::builtin(), &small_config()).expect("search");
    assert_eq!(outcome.history.len(), 7);
    for pair in outcome.history.windows(2) {
        assert!(
            pair[1].best >= pair[0].best,
            "generation {} best {} < previous {}",
            pair[1].generation,
            pair[1].best,
            pair[0].best
        );
    }
}

#[test]
fn outcome_report_matches_a_fresh_evaluation() {
    let cfg = small_config();
    let catalog = Catalog::builtin();
    let outcome = find_build_order(catalog, &cfg).expect("search");

    assert_eq!(outcome.best.len(), cfg.order_length);
    assert!(outcome.best.iter().all(|a| cfg.vocabulary.contains(a)));
    let again = evaluate(catalog, &outcome.best, cfg.target_time).expect("evaluate");
    assert_eq!(outcome.report, again);
    let last = outcome.history.last().expect("history");
    assert_eq!(last.best, outcome.report.total_dps);
    assert!(outcome.report.total_dps >= 110.0, "starting probes alone give 110");
}

#[test]
fn same_seed_same_result() {
    let cfg = small_config();
    let a = find_build_order(Catalog::builtin(), &cfg).expect("search");
    let b = find_build_order_with(Catalog::builtin(), &cfg, &mut rng(cfg.seed)).expect("search");
    assert_eq!(a.best, b.best);
    assert_eq!(a.report, b.report);
}

#[test]
fn invalid_inputs_fail_before_simulating() {
    let catalog = Catalog::builtin();
    let check = |cfg: SearchConfig| find_build_order(catalog, &cfg).err();

    assert!(matches!(
        check(SearchConfig { target_time: 0, ..small_config() }),
        Some(SearchError::ZeroTargetTime)
    ));
    assert!(matches!(
        check(SearchConfig { vocabulary: Vec::new(), ..small_config() }),
        Some(SearchError::EmptyVocabulary)
    ));
    assert!(matches!(
        check(SearchConfig { vocabulary: vec!["scout".into()], ..small_config() }),
        Some(SearchError::UnknownVocabularyAction(id)) if id == "scout"
    ));
    assert!(matches!(
        check(SearchConfig { population_size: 0, ..small_config() }),
        Some(SearchError::EmptyPopulation)
    ));
    assert!(matches!(
        check(SearchConfig { order_length: 0, ..small_config() }),
        Some(SearchError::EmptyBuildOrder)
    ));
    assert!(matches!(
        check(SearchConfig { mutation_rate: 1.5, ..small_config() }),
        Some(SearchError::InvalidMutationRate(_))
    ));
}

/* ──────────────────────────────────────────────────────────────────────────
4) Config
────────────────────────────────────────────────────────────────────────── */

#[test]
fn config_defaults_match_the_classic_driver() {
    let cfg = SearchConfig::default();
    assert_eq!(cfg.target_time, 1800);
    assert_eq!(cfg.population_size, 20);
    assert_eq!(cfg.generations, 50);
    assert_eq!(cfg.mutation_rate, 0.1);
    assert_eq!(cfg.order_length, 40);
    assert_eq!(cfg.vocabulary, vocabulary());
    assert!(cfg.validate(Catalog::builtin()).is_ok());
}

#[test]
fn partial_json_config_fills_defaults() {
    let cfg = SearchConfig::from_json_str(r#"{ "target_time": 600, "seed": 9 }"#).expect("parse");
    assert_eq!(cfg.target_time, 600);
    assert_eq!(cfg.seed, 9);
    assert_eq!(cfg.population_size, 20);
    assert_eq!(cfg.vocabulary.len(), 7);
}

#[test]
fn missing_config_file_reports_path() {
    let path = std::path::Path::new("/nonexistent/build_finder/search.json");
    let err = SearchConfig::from_file(path).expect_err("no such file");
    assert!(err.to_string().contains("search.json"), "unexpected error: {err}");
}
