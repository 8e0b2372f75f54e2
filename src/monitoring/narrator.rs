use crate::control_system::evolution::{EvolutionOutcome, Termination};
use crate::control_system::ga_config::GaConfig;
use crate::shared_data::{Approach, Individual};

/// Snapshot handed to observers after every generation.
#[derive(Debug, Clone)]
pub struct GenerationReport<'a> {
    /// 1-based generation number.
    pub generation: usize,
    /// Best individual seen so far across all generations.
    pub best: &'a Individual,
    pub improved: bool,
    /// Consecutive generations without improvement.
    pub no_improvement: usize,
    pub patience: usize,
}

/// Hooks into the evolution loop. All methods run on the orchestrating thread.
pub trait GenerationObserver {
    fn on_start(&mut self, _config: &GaConfig, _initial_best: &Individual) {}
    fn on_generation(&mut self, _report: &GenerationReport<'_>) {}
    fn on_finish(&mut self, _outcome: &EvolutionOutcome) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

/// Narrates the run through `log` at info level, one line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNarrator;

fn join_greens(greens: &[u32]) -> String {
    greens
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl GenerationObserver for LogNarrator {
    fn on_start(&mut self, config: &GaConfig, initial_best: &Individual) {
        log::info!(
            "[ga] pop_size={} max_iter={} green_min={} green_max={} cycle_time={}",
            config.pop_size,
            config.max_iter,
            config.green_min,
            config.green_max,
            config.cycle_time
        );
        log::info!("[ga] starting best delay={}", initial_best.total_delay);
    }

    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        if report.improved {
            log::info!(
                "[iter {}] new best delay = {}  green = [{}]",
                report.generation,
                report.best.total_delay,
                join_greens(&report.best.greens)
            );
        } else {
            log::info!(
                "[iter {}] best delay = {} (no improvement: {}/{})",
                report.generation,
                report.best.total_delay,
                report.no_improvement,
                report.patience
            );
        }
    }

    fn on_finish(&mut self, outcome: &EvolutionOutcome) {
        if let Termination::Converged { generation } = outcome.termination {
            log::info!(
                "[ga] Early stopping at iter {} (no improvement for {} iterations)",
                generation,
                outcome.patience
            );
        }
        log::info!("GA finished. Final best delay = {}", outcome.best.total_delay);
        if outcome.best.greens.len() == Approach::ALL.len() {
            let parts: Vec<String> = Approach::ALL
                .iter()
                .zip(&outcome.best.greens)
                .map(|(a, g)| format!("{}={}", a.short_name(), g))
                .collect();
            log::info!("Final greens: {}", parts.join(" "));
        } else {
            log::info!("Final greens: [{}]", join_greens(&outcome.best.greens));
        }
    }
}
