use crate::control_system::ga_config::{GaConfig, InfeasiblePolicy};
use crate::control_system::repair::{green_total, normalize_greens};
use crate::flow_analyzer::total_delay;
use crate::global_variables::INIT_ATTEMPT_FACTOR;
use crate::shared_data::{Individual, LightConstants};
use rand::Rng;

/// Individuals kept in ascending order of total delay.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Takes ownership of a generation and sorts it.
    pub fn from_individuals(mut individuals: Vec<Individual>) -> Self {
        individuals.sort_by(|a, b| a.cmp_delay(b));
        Self { individuals }
    }

    /// Random initial population.
    ///
    /// Each candidate samples every light uniformly from `[green_min, green_max]`.
    /// Under `Repair` it is normalized and always admitted; under `Reject` a
    /// candidate that overruns the cycle is dropped. Sampling stops after
    /// `pop_size * 1000` attempts, so the result may be short. An empty result
    /// is replaced by a single individual with every light at `green_min`.
    pub fn initialize<R: Rng + ?Sized>(
        config: &GaConfig,
        lcs: &[LightConstants],
        rng: &mut R,
    ) -> Self {
        let mut individuals = Vec::with_capacity(config.pop_size);
        let max_attempts = config.pop_size.saturating_mul(INIT_ATTEMPT_FACTOR);

        let mut attempts = 0;
        while individuals.len() < config.pop_size && attempts < max_attempts {
            attempts += 1;
            let mut greens: Vec<u32> = (0..config.num_lights)
                .map(|_| rng.random_range(config.green_min..=config.green_max))
                .collect();

            match config.infeasible_policy {
                InfeasiblePolicy::Repair => normalize_greens(
                    &mut greens,
                    config.cycle_time,
                    config.green_min,
                    config.green_max,
                ),
                InfeasiblePolicy::Reject => {
                    if green_total(&greens) > config.cycle_time as u64 {
                        continue;
                    }
                }
            }

            let delay = total_delay(config.cycle_time, &greens, lcs);
            individuals.push(Individual::new(greens, delay));
        }

        if individuals.len() < config.pop_size {
            log::warn!(
                "population initialized short: {} of {} after {} attempts",
                individuals.len(),
                config.pop_size,
                attempts
            );
        }
        if individuals.is_empty() {
            let greens = vec![config.green_min; config.num_lights];
            let delay = total_delay(config.cycle_time, &greens, lcs);
            individuals.push(Individual::new(greens, delay));
        }

        Self::from_individuals(individuals)
    }

    /// The lowest-delay individual. Panics on an empty population, which
    /// `initialize` never produces.
    pub fn best(&self) -> &Individual {
        &self.individuals[0]
    }

    pub fn worst(&self) -> &Individual {
        &self.individuals[self.individuals.len() - 1]
    }

    pub fn get(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|w| w[0].total_delay <= w[1].total_delay)
    }
}
