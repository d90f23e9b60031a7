pub mod econ;
pub mod stoch;

pub use econ::*;
pub use stoch::*;
