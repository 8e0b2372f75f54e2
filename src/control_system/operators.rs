use rand::Rng;

/// Single-point crossover. The suffix from a cut in `[1, n-1]` is swapped
/// between the parents. With one light or fewer the parents come back unchanged.
pub fn crossover<R: Rng + ?Sized>(p1: &[u32], p2: &[u32], rng: &mut R) -> (Vec<u32>, Vec<u32>) {
    let num_lights = p1.len().min(p2.len());
    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    if num_lights <= 1 {
        return (c1, c2);
    }
    let point = rng.random_range(1..num_lights);
    c1[point..num_lights].swap_with_slice(&mut c2[point..num_lights]);
    (c1, c2)
}

/// Fixed-step mutation: each light moves by `±round(0.02 * (green_max - green_min))`
/// with probability `mutation_rate`, then is clamped back into bounds.
pub fn mutate<R: Rng + ?Sized>(
    mut greens: Vec<u32>,
    mutation_rate: f64,
    green_min: u32,
    green_max: u32,
    rng: &mut R,
) -> Vec<u32> {
    let step = (0.02 * (green_max - green_min) as f64).round() as i64;
    for g in greens.iter_mut() {
        if rng.random::<f64>() < mutation_rate {
            let delta = if rng.random_bool(0.5) { step } else { -step };
            let moved = (*g as i64 + delta).clamp(green_min as i64, green_max as i64);
            *g = moved as u32;
        }
    }
    greens
}

/// Reverse the segment between two uniformly drawn positions (inclusive).
pub fn inversion<R: Rng + ?Sized>(mut greens: Vec<u32>, rng: &mut R) -> Vec<u32> {
    let num_lights = greens.len();
    if num_lights < 2 {
        return greens;
    }
    let i1 = rng.random_range(0..num_lights);
    let i2 = rng.random_range(0..num_lights);
    let (lo, hi) = if i1 <= i2 { (i1, i2) } else { (i2, i1) };
    greens[lo..=hi].reverse();
    greens
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn crossover_with_single_light_returns_parents() {
        let mut rng = SmallRng::seed_from_u64(1);
        let (c1, c2) = crossover(&[25], &[40], &mut rng);
        assert_eq!(c1, vec![25]);
        assert_eq!(c2, vec![40]);
    }

    #[test]
    fn crossover_swaps_a_nonempty_proper_suffix() {
        let mut rng = SmallRng::seed_from_u64(7);
        let p1 = [1, 2, 3, 4];
        let p2 = [11, 12, 13, 14];
        for _ in 0..200 {
            let (c1, c2) = crossover(&p1, &p2, &mut rng);
            // First gene always comes from the own parent, last always from the other.
            assert_eq!(c1[0], 1);
            assert_eq!(c2[0], 11);
            assert_eq!(c1[3], 14);
            assert_eq!(c2[3], 4);
            let cut = c1.iter().position(|&g| g > 10).unwrap();
            assert!((1..4).contains(&cut));
            assert!(c1[..cut].iter().all(|&g| g < 10));
            assert!(c1[cut..].iter().all(|&g| g > 10));
            assert_eq!(&c2[..cut], &p2[..cut]);
            assert_eq!(&c2[cut..], &p1[cut..]);
        }
    }

    #[test]
    fn zero_rate_mutation_is_identity() {
        let mut rng = SmallRng::seed_from_u64(3);
        let greens = vec![10, 35, 47, 60];
        assert_eq!(mutate(greens.clone(), 0.0, 10, 60, &mut rng), greens);
    }

    #[test]
    fn full_rate_mutation_moves_by_fixed_step() {
        let mut rng = SmallRng::seed_from_u64(5);
        let greens = vec![30, 30, 30, 30];
        for _ in 0..100 {
            let mutated = mutate(greens.clone(), 1.0, 10, 60, &mut rng);
            // step = round(0.02 * 50) = 1
            assert!(mutated.iter().all(|&g| g == 29 || g == 31));
        }
    }

    #[test]
    fn mutation_is_clamped_to_bounds() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            let mutated = mutate(vec![0, 200, 10, 60], 1.0, 0, 200, &mut rng);
            // step = 4
            assert!(mutated[0] == 0 || mutated[0] == 4);
            assert!(mutated[1] == 196 || mutated[1] == 200);
        }
    }

    #[test]
    fn inversion_reorders_without_changing_contents() {
        let mut rng = SmallRng::seed_from_u64(11);
        let greens = vec![10, 20, 30, 40, 50];
        let mut saw_change = false;
        for _ in 0..100 {
            let inverted = inversion(greens.clone(), &mut rng);
            let mut sorted = inverted.clone();
            sorted.sort();
            assert_eq!(sorted, greens);
            saw_change |= inverted != greens;
        }
        assert!(saw_change);
    }

    #[test]
    fn inversion_of_single_light_is_identity() {
        let mut rng = SmallRng::seed_from_u64(13);
        assert_eq!(inversion(vec![42], &mut rng), vec![42]);
    }
}
