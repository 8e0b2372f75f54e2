pub mod cli;
pub mod control_system;
pub mod errors;
pub mod flow_analyzer;
pub mod global_variables;
pub mod monitoring;
pub mod shared_data;

pub use control_system::{genetic_algorithm, optimize_counts, EvolutionOutcome, GaConfig};
pub use errors::{OptimizerError, Result};
pub use shared_data::{Individual, LightConstants, SignalPlan};
