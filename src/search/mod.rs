// src/search/mod.rs

// Search orchestration on top of the systems: a generic generational harness
// and the build-order search that drives it.

pub mod build_order;
pub mod config;
pub mod sdk;

pub use build_order::*;
pub use config::*;
