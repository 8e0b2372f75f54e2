use crate::global_variables::{
    DEGENERATE_CYCLE_DELAY, SATURATION_EPSILON, SATURATION_PENALTY_BASE,
    SATURATION_PENALTY_SLOPE,
};
use crate::shared_data::LightConstants;

/// Precompute the constants for one approach from its waiting vehicle count.
pub fn light_constants(vehicle_count: u32, capacity: f64) -> LightConstants {
    let x = (capacity - vehicle_count as f64) / capacity;
    let rad = (x - 1.0) + (x - 1.0) * (x - 1.0) + (16.0 * x) / capacity;
    LightConstants {
        congestion: x,
        capacity,
        overflow_term: 173.0 * (x * x) * rad.max(0.0).sqrt(),
    }
}

/// Modeled delay for one approach with green time `green` in a cycle of length `cycle`.
///
/// Uniform arrival delay plus the precomputed overflow term. Near saturation the
/// model returns a large penalty that still grows with the distance past the
/// saturation point, so two infeasible candidates remain comparable.
pub fn light_delay(cycle: f64, green: f64, lc: &LightConstants) -> f64 {
    if cycle <= 0.0 {
        return DEGENERATE_CYCLE_DELAY;
    }
    let ratio = green / cycle;
    let a = (1.0 - ratio) * (1.0 - ratio);

    let p = 1.0 - ratio * lc.congestion;
    if p <= SATURATION_EPSILON {
        return SATURATION_PENALTY_BASE + p.abs() * SATURATION_PENALTY_SLOPE;
    }

    let uniform_delay = (0.38 * cycle * a) / p;
    uniform_delay + lc.overflow_term
}

/// Sum of per-light delays. `greens` and `lcs` are paired by index.
pub fn total_delay(cycle_time: u32, greens: &[u32], lcs: &[LightConstants]) -> f64 {
    greens
        .iter()
        .zip(lcs)
        .map(|(&g, lc)| light_delay(cycle_time as f64, g as f64, lc))
        .sum()
}
