use crate::control_system::evolution::{genetic_algorithm, EvolutionOutcome};
use crate::control_system::ga_config::GaConfig;
use crate::errors::{OptimizerError, Result};
use crate::flow_analyzer::light_constants;
use crate::global_variables::NUM_LIGHTS;
use crate::monitoring::GenerationObserver;
use crate::shared_data::{LightConstants, SignalPlan};

/// Splits the green time of one four-way intersection from its queue lengths.
pub struct GreenSplitController {
    config: GaConfig,
}

impl GreenSplitController {
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        if config.num_lights != NUM_LIGHTS {
            return Err(OptimizerError::InvalidConfig(format!(
                "a four-way intersection needs num_lights = {}, got {}",
                NUM_LIGHTS, config.num_lights
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Congestion constants for north, south, west, east.
    pub fn light_constants(&self, vehicle_counts: [u32; NUM_LIGHTS]) -> Vec<LightConstants> {
        vehicle_counts
            .iter()
            .map(|&count| light_constants(count, self.config.capacity))
            .collect()
    }

    pub fn optimize(
        &self,
        vehicle_counts: [u32; NUM_LIGHTS],
        observer: &mut dyn GenerationObserver,
    ) -> Result<(SignalPlan, EvolutionOutcome)> {
        let lcs = self.light_constants(vehicle_counts);
        let outcome = genetic_algorithm(&self.config, &lcs, observer)?;
        let plan = SignalPlan::from_individual(&outcome.best)?;
        Ok((plan, outcome))
    }
}

/// One-shot helper around [`GreenSplitController`].
pub fn optimize_counts(
    vehicle_counts: [u32; NUM_LIGHTS],
    config: &GaConfig,
    observer: &mut dyn GenerationObserver,
) -> Result<(SignalPlan, EvolutionOutcome)> {
    GreenSplitController::new(config.clone())?.optimize(vehicle_counts, observer)
}
