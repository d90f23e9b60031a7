pub mod sdk;
pub mod evaluator;
pub mod genetic;
pub mod simulator;
