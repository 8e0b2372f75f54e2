use crate::control_system::ga_config::{GaConfig, InfeasiblePolicy};
use crate::control_system::operators::{crossover, mutate};
use crate::control_system::population::Population;
use crate::control_system::repair::{green_total, normalize_greens};
use crate::control_system::selection::SelectionPolicy;
use crate::errors::{OptimizerError, Result};
use crate::flow_analyzer::total_delay;
use crate::global_variables::{PAIRS_PER_TASK, REJECT_ATTEMPTS};
use crate::monitoring::{GenerationObserver, GenerationReport};
use crate::shared_data::{Individual, LightConstants};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No improvement for `patience` generations; stopped after `generation`.
    Converged { generation: usize },
    /// Ran all `max_iter` generations.
    Exhausted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub best: Individual,
    /// Best delay after initialization, then after every generation. Never increases.
    pub trajectory: Vec<f64>,
    pub termination: Termination,
    pub generations: usize,
    pub patience: usize,
    /// The run-wide seed actually used.
    pub seed: u64,
}

/// Read-only state shared by every breeding task within one generation.
struct Breeder<'a> {
    config: &'a GaConfig,
    lcs: &'a [LightConstants],
    population: &'a Population,
    selection: &'a SelectionPolicy,
}

impl<'a> Breeder<'a> {
    fn evaluate(&self, greens: Vec<u32>) -> Individual {
        let delay = total_delay(self.config.cycle_time, &greens, self.lcs);
        Individual::new(greens, delay)
    }

    /// Select two parents, cross them over and mutate both children.
    fn breed<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, Vec<u32>, Vec<u32>) {
        let i1 = self.selection.select(rng);
        let i2 = self.selection.select(rng);
        let (c1, c2) = crossover(
            &self.population.get(i1).greens,
            &self.population.get(i2).greens,
            rng,
        );
        let config = self.config;
        let c1 = mutate(c1, config.mutation_rate, config.green_min, config.green_max, rng);
        let c2 = mutate(c2, config.mutation_rate, config.green_min, config.green_max, rng);
        (i1, c1, c2)
    }

    /// Fill one sibling pair (or a trailing single slot).
    fn fill_pair<R: Rng + ?Sized>(&self, slots: &mut [Individual], rng: &mut R) {
        let config = self.config;
        match config.infeasible_policy {
            InfeasiblePolicy::Repair => {
                let (_, c1, c2) = self.breed(rng);
                for (slot, mut greens) in slots.iter_mut().zip([c1, c2]) {
                    normalize_greens(
                        &mut greens,
                        config.cycle_time,
                        config.green_min,
                        config.green_max,
                    );
                    *slot = self.evaluate(greens);
                }
            }
            InfeasiblePolicy::Reject => {
                let mut filled = 0;
                let mut first_parent = None;
                for _ in 0..REJECT_ATTEMPTS {
                    if filled == slots.len() {
                        break;
                    }
                    let (i1, c1, c2) = self.breed(rng);
                    first_parent.get_or_insert(i1);
                    for greens in [c1, c2] {
                        if filled < slots.len() && green_total(&greens) <= config.cycle_time as u64
                        {
                            slots[filled] = self.evaluate(greens);
                            filled += 1;
                        }
                    }
                }
                // Parents are always feasible.
                let parent = self.population.get(first_parent.unwrap_or(0));
                for slot in slots[filled..].iter_mut() {
                    *slot = parent.clone();
                }
            }
        }
    }

    /// Build the next generation: slot 0 is the elite, the rest are bred in
    /// sibling pairs across the worker pool. Each task draws from its own RNG.
    fn next_generation(&self, run_seed: u64, generation: usize) -> Vec<Individual> {
        let mut next_gen = vec![self.population.best().clone(); self.config.pop_size];

        next_gen[1..]
            .par_chunks_mut(2 * PAIRS_PER_TASK)
            .enumerate()
            .for_each(|(task, chunk)| {
                let mut rng = SmallRng::seed_from_u64(task_seed(run_seed, generation, task));
                for pair in chunk.chunks_mut(2) {
                    self.fill_pair(pair, &mut rng);
                }
            });

        next_gen
    }
}

/// Derive an independent stream seed for one task (splitmix64 finalizer).
fn task_seed(run_seed: u64, generation: usize, task: usize) -> u64 {
    let mut z = run_seed
        ^ (generation as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (task as u64 + 1).wrapping_mul(0xD6E8_FEB8_6659_FD93);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Run the genetic algorithm for one intersection.
///
/// `lcs` holds one entry per light. Returns the best individual found and the
/// best-delay trajectory (one entry per generation run, plus the initial one).
pub fn genetic_algorithm(
    config: &GaConfig,
    lcs: &[LightConstants],
    observer: &mut dyn GenerationObserver,
) -> Result<EvolutionOutcome> {
    config.validate()?;
    if lcs.len() != config.num_lights {
        return Err(OptimizerError::InvalidConfig(format!(
            "expected {} light constants, got {}",
            config.num_lights,
            lcs.len()
        )));
    }

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .build()?;

    let mut init_rng = SmallRng::seed_from_u64(seed);
    let mut population = Population::initialize(config, lcs, &mut init_rng);

    let mut best = population.best().clone();
    let mut trajectory = Vec::with_capacity(config.max_iter + 1);
    trajectory.push(best.total_delay);
    observer.on_start(config, &best);
    log::debug!("seed={} threads={}", seed, pool.current_num_threads());

    let mut no_improvement = 0;
    let mut generations = 0;
    let mut termination = Termination::Exhausted;

    for iter in 0..config.max_iter {
        let selection = SelectionPolicy::new(&population, config.beta);
        let breeder = Breeder {
            config,
            lcs,
            population: &population,
            selection: &selection,
        };
        let next_gen = pool.install(|| breeder.next_generation(seed, iter));
        population = Population::from_individuals(next_gen);
        generations = iter + 1;

        let improved = population.best().total_delay < best.total_delay;
        if improved {
            best = population.best().clone();
            no_improvement = 0;
        } else {
            no_improvement += 1;
        }
        trajectory.push(best.total_delay);

        observer.on_generation(&GenerationReport {
            generation: generations,
            best: &best,
            improved,
            no_improvement,
            patience: config.patience,
        });

        if no_improvement >= config.patience {
            termination = Termination::Converged {
                generation: generations,
            };
            break;
        }
    }

    let outcome = EvolutionOutcome {
        best,
        trajectory,
        termination,
        generations,
        patience: config.patience,
        seed,
    };
    observer.on_finish(&outcome);
    Ok(outcome)
}
