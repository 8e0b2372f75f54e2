/// Bring a green-time assignment back within the cycle budget.
///
/// Assignments that already fit are left alone; spare cycle time is not
/// redistributed. Otherwise every light is scaled by `cycle_time / sum`,
/// clamped into `[green_min, green_max]`, and lights above `green_min` are
/// trimmed one second at a time, round-robin, until the sum fits.
///
/// Requires `green_min * greens.len() <= cycle_time`; if that does not hold
/// the trimming stops once every light sits at `green_min`.
pub fn normalize_greens(greens: &mut [u32], cycle_time: u32, green_min: u32, green_max: u32) {
    let cycle_time_total = cycle_time as u64;
    let sum = green_total(greens);
    if sum <= cycle_time_total {
        return;
    }

    let scale = cycle_time as f64 / sum as f64;
    let mut new_sum = 0u64;
    for g in greens.iter_mut() {
        *g = ((*g as f64 * scale) as u32).clamp(green_min, green_max);
        new_sum += *g as u64;
    }

    let mut idx = 0;
    while new_sum > cycle_time_total {
        if greens.iter().all(|&g| g <= green_min) {
            break;
        }
        if greens[idx] > green_min {
            greens[idx] -= 1;
            new_sum -= 1;
        }
        idx = (idx + 1) % greens.len();
    }
}

/// Sum of green times, widened so no `u32` input can overflow.
pub fn green_total(greens: &[u32]) -> u64 {
    greens.iter().map(|&g| g as u64).sum()
}

/// True if every light is within bounds and the total fits the cycle.
pub fn is_feasible(greens: &[u32], cycle_time: u32, green_min: u32, green_max: u32) -> bool {
    greens.iter().all(|g| (green_min..=green_max).contains(g))
        && green_total(greens) <= cycle_time as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn fitting_assignment_is_untouched() {
        let mut greens = vec![10, 20, 30, 40];
        normalize_greens(&mut greens, 148, 10, 60);
        assert_eq!(greens, vec![10, 20, 30, 40]);
    }

    #[test]
    fn under_allocation_is_not_redistributed() {
        let mut greens = vec![10, 10, 10, 10];
        normalize_greens(&mut greens, 148, 10, 60);
        assert_eq!(greens.iter().sum::<u32>(), 40);
    }

    #[test]
    fn overrun_is_scaled_down() {
        let mut greens = vec![60, 60, 60, 60];
        normalize_greens(&mut greens, 148, 10, 60);
        // 60 * 148 / 240 = 37
        assert_eq!(greens, vec![37, 37, 37, 37]);
    }

    #[test]
    fn clamping_to_minimum_is_trimmed_round_robin() {
        // Scaled to [30, 5, 5, 5], clamped to [30, 10, 10, 10]; only the first light can give.
        let mut greens = vec![60, 10, 10, 10];
        normalize_greens(&mut greens, 45, 10, 60);
        assert_eq!(greens, vec![15, 10, 10, 10]);
    }

    #[test]
    fn stops_when_every_light_is_at_minimum() {
        let mut greens = vec![30, 30, 30, 30];
        normalize_greens(&mut greens, 30, 10, 60);
        assert_eq!(greens, vec![10, 10, 10, 10]);
    }

    #[test]
    fn huge_green_times_do_not_overflow() {
        let mut greens = vec![u32::MAX, 10];
        normalize_greens(&mut greens, 148, 10, 60);
        assert!(is_feasible(&greens, 148, 10, 60), "{:?}", greens);
        assert_eq!(greens, vec![60, 10]);

        let mut greens = vec![u32::MAX; 4];
        normalize_greens(&mut greens, 148, 10, 60);
        assert!(is_feasible(&greens, 148, 10, 60), "{:?}", greens);
        assert!(greens.iter().all(|&g| g == greens[0]));
        assert!(!is_feasible(&[u32::MAX, u32::MAX], 148, 0, u32::MAX));
    }

    #[test]
    fn repair_invariant_holds_for_random_inputs() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..2000 {
            let n: usize = rng.random_range(1..=6);
            let green_min: u32 = rng.random_range(0..=15);
            let green_max: u32 = rng.random_range(green_min..=90);
            let cycle_time: u32 = rng.random_range(green_min * n as u32..=400);
            let mut greens: Vec<u32> = (0..n)
                .map(|_| {
                    if rng.random_bool(0.05) {
                        rng.random_range(u32::MAX - 1000..=u32::MAX)
                    } else {
                        rng.random_range(0..=120)
                    }
                })
                .collect();
            let raw_sum = green_total(&greens);
            normalize_greens(&mut greens, cycle_time, green_min, green_max);
            if raw_sum > cycle_time as u64 {
                assert!(
                    is_feasible(&greens, cycle_time, green_min, green_max),
                    "{:?} cycle={} min={} max={}",
                    greens,
                    cycle_time,
                    green_min,
                    green_max
                );
            } else {
                assert!(green_total(&greens) <= cycle_time as u64);
            }
        }
    }
}
