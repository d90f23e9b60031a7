// demos/build_finder.rs
// Run with:
//   cargo run --example build_finder [-- path/to/search.json]
// Per-tick replay of the winner:
//   RUST_LOG=build_finder::sim=debug cargo run --example build_finder

use std::path::PathBuf;

use build_finder::search::{SearchConfig, find_build_order};
use build_finder::systems::evaluator::evaluate_with_hooks;
use build_finder::systems::sdk::{Hook, TraceHook};
use build_finder::Catalog;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => SearchConfig::from_file(&path)?,
        None => SearchConfig::default(),
    };
    let catalog = Catalog::builtin();

    let outcome = find_build_order(catalog, &cfg)?;

    println!("Optimal Build Order:\n");
    for action in &outcome.best {
        println!("- {action}");
    }
    println!();
    println!("Best Score: {}", serde_json::to_string_pretty(&outcome.report)?);

    // Replay the winner with the trace hook; visible only when RUST_LOG asks.
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(TraceHook)];
    let replay = evaluate_with_hooks(catalog, &outcome.best, cfg.target_time, &mut hooks)?;
    if replay != outcome.report {
        tracing::warn!(target: "build_finder::search", "replay diverged from the search report");
    }
    Ok(())
}
