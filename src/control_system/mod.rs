pub mod evolution;
pub mod ga_config;
pub mod green_split_controller;
pub mod operators;
pub mod population;
pub mod repair;
pub mod selection;

pub use evolution::{genetic_algorithm, EvolutionOutcome, Termination};
pub use ga_config::{GaConfig, InfeasiblePolicy, Profile};
pub use green_split_controller::{optimize_counts, GreenSplitController};
pub use population::Population;
pub use repair::normalize_greens;
pub use selection::SelectionPolicy;
