use crate::errors::{OptimizerError, Result};
use crate::global_variables::{
    APPROACH_CAPACITY, CYCLE_TIME, EARLY_STOP_PATIENCE, GREEN_MAX, GREEN_MIN, MAX_ITER,
    NUM_LIGHTS, POP_SIZE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// What happens to an offspring whose green times overrun the cycle budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfeasiblePolicy {
    /// Scale and trim the offspring back into feasibility.
    Repair,
    /// Discard the offspring and breed a replacement.
    Reject,
}

/// Named tuning profiles. Both were observed on the deployed optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// mutation 0.15, beta 4.0, repair infeasible offspring.
    Balanced,
    /// mutation 0.02, beta 8.0, reject infeasible offspring.
    Strict,
}

impl FromStr for Profile {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Profile::Balanced),
            "strict" => Ok(Profile::Strict),
            other => Err(OptimizerError::InvalidConfig(format!(
                "unknown profile '{}' (expected balanced or strict)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub pop_size: usize,
    pub num_lights: usize,
    pub max_iter: usize,
    pub green_min: u32,
    pub green_max: u32,
    pub cycle_time: u32,
    pub mutation_rate: f64,
    /// Selection pressure. Larger values favour the elites more strongly.
    pub beta: f64,
    /// Generations without improvement before the loop stops early.
    pub patience: usize,
    pub infeasible_policy: InfeasiblePolicy,
    /// Per-approach flow capacity used to derive the congestion constants.
    pub capacity: f64,
    /// Run-wide seed. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    /// Worker threads. `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::from_profile(Profile::Balanced)
    }
}

impl GaConfig {
    pub fn from_profile(profile: Profile) -> Self {
        let (mutation_rate, beta, infeasible_policy) = match profile {
            Profile::Balanced => (0.15, 4.0, InfeasiblePolicy::Repair),
            Profile::Strict => (0.02, 8.0, InfeasiblePolicy::Reject),
        };
        Self {
            pop_size: POP_SIZE,
            num_lights: NUM_LIGHTS,
            max_iter: MAX_ITER,
            green_min: GREEN_MIN,
            green_max: GREEN_MAX,
            cycle_time: CYCLE_TIME,
            mutation_rate,
            beta,
            patience: EARLY_STOP_PATIENCE,
            infeasible_policy,
            capacity: APPROACH_CAPACITY,
            seed: None,
            threads: None,
        }
    }

    /// Layer a (possibly partial) JSON object over this config.
    pub fn merge_json(&self, json: &str) -> Result<Self> {
        let mut value = serde_json::to_value(self)?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        match (&mut value, overrides) {
            (serde_json::Value::Object(base), serde_json::Value::Object(over)) => {
                for (key, v) in over {
                    base.insert(key, v);
                }
            }
            _ => {
                return Err(OptimizerError::InvalidConfig(
                    "config file must contain a JSON object".to_string(),
                ))
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn merge_file(&self, path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| OptimizerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_json(&json)
    }

    /// Checks the preconditions the engine relies on.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(OptimizerError::InvalidConfig(msg)) };
        if self.pop_size == 0 {
            return fail("pop_size must be at least 1".to_string());
        }
        if self.num_lights == 0 {
            return fail("num_lights must be at least 1".to_string());
        }
        if self.green_min > self.green_max {
            return fail(format!(
                "green_min ({}) exceeds green_max ({})",
                self.green_min, self.green_max
            ));
        }
        // normalize_greens cannot terminate otherwise
        let min_total = self.green_min as u64 * self.num_lights as u64;
        if min_total > self.cycle_time as u64 {
            return fail(format!(
                "green_min * num_lights ({}) exceeds cycle_time ({})",
                min_total, self.cycle_time
            ));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return fail(format!("beta must be positive, got {}", self.beta));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return fail(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.patience == 0 {
            return fail("patience must be at least 1".to_string());
        }
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return fail(format!("capacity must be positive, got {}", self.capacity));
        }
        if self.threads == Some(0) {
            return fail("threads must be at least 1".to_string());
        }
        Ok(())
    }
}
