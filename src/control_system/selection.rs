use crate::control_system::population::Population;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Boltzmann-style roulette wheel over a sorted population.
///
/// Built once per generation and only read afterwards, so many workers can
/// draw from it at the same time.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    weights: Vec<f64>,
    dist: Option<WeightedIndex<f64>>,
}

impl SelectionPolicy {
    /// `w_i = exp(-beta * (d_i - d_best) / (d_worst - d_best))`, or uniform
    /// weights once the population has converged to a single delay.
    pub fn new(population: &Population, beta: f64) -> Self {
        if population.is_empty() {
            return Self {
                weights: Vec::new(),
                dist: None,
            };
        }

        let min_delay = population.best().total_delay;
        let worst = population.worst().total_delay;
        let weights: Vec<f64> = if worst <= min_delay {
            vec![1.0; population.len()]
        } else {
            let span = worst - min_delay;
            population
                .individuals()
                .iter()
                .map(|ind| (-beta * (ind.total_delay - min_delay) / span).exp())
                .collect()
        };

        let dist = match WeightedIndex::new(&weights) {
            Ok(dist) => Some(dist),
            Err(e) => {
                log::warn!("selection weights unusable ({}), drawing uniformly", e);
                None
            }
        };
        Self { weights, dist }
    }

    /// Draw one population index.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match &self.dist {
            Some(dist) => dist.sample(rng),
            None if self.weights.is_empty() => 0,
            None => rng.random_range(0..self.weights.len()),
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weights normalized to sum to one.
    pub fn probabilities(&self) -> Vec<f64> {
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            let n = self.weights.len().max(1) as f64;
            return vec![1.0 / n; self.weights.len()];
        }
        self.weights.iter().map(|w| w / total).collect()
    }
}
