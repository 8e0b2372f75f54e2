// Reference intersection model
pub const NUM_LIGHTS: usize = 4;
pub const APPROACH_CAPACITY: f64 = 20.0;

// Signal cycle (160s minus 12s of lost/amber time)
pub const CYCLE_TIME: u32 = 160 - 12;
pub const GREEN_MIN: u32 = 10;
pub const GREEN_MAX: u32 = 60;

// Genetic algorithm
pub const POP_SIZE: usize = 400;
pub const MAX_ITER: usize = 25;
pub const EARLY_STOP_PATIENCE: usize = 5;
pub const INIT_ATTEMPT_FACTOR: usize = 1000;
pub const REJECT_ATTEMPTS: usize = 1000;
pub const PAIRS_PER_TASK: usize = 16;

// Delay model
pub const DEGENERATE_CYCLE_DELAY: f64 = 1e18;
pub const SATURATION_EPSILON: f64 = 1e-9;
pub const SATURATION_PENALTY_BASE: f64 = 1e12;
pub const SATURATION_PENALTY_SLOPE: f64 = 1e6;
