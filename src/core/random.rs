//! Random helpers shared by roster setup, AI decisions and resolution
//!
//! Everything takes the caller's RNG so a seeded `ChaCha8Rng` makes a whole
//! game reproducible.

use std::cmp::Ordering;

use rand::Rng;

/// Uniform choice from a slice (`None` when empty)
pub fn choose<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

/// Uniform draw from `[0, max)`; zero when `max` is zero
pub fn unit_scaled<R: Rng + ?Sized>(max: f64, rng: &mut R) -> f64 {
    rng.gen::<f64>() * max
}

/// Bernoulli trial that tolerates probabilities at the edges
pub fn chance<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < probability
}

/// Noisy "should `b` come before `a`" comparison
///
/// Returns the ordering of `a` relative to `b` under a descending sort,
/// perturbed by `uniform(-amplitude, amplitude)` drawn fresh per call:
/// `(b - a) + noise > 0` means `b` ranks first.
pub fn noisy_descending<R: Rng + ?Sized>(a: f64, b: f64, amplitude: f64, rng: &mut R) -> Ordering {
    let noise = (rng.gen::<f64>() - 0.5) * 2.0 * amplitude;
    let delta = (b - a) + noise;
    if delta > 0.0 {
        Ordering::Greater
    } else if delta < 0.0 {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Pick the head of a noisy descending order with one pass
///
/// Each challenger is compared once against the current champion using
/// [`noisy_descending`]. With zero amplitude this is a first-maximum scan.
pub fn noisy_max_by_key<'a, T, R, F>(
    items: &'a [T],
    amplitude: f64,
    rng: &mut R,
    key: F,
) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let mut iter = items.iter();
    let mut champion = iter.next()?;
    for challenger in iter {
        if noisy_descending(key(champion), key(challenger), amplitude, rng) == Ordering::Greater {
            champion = challenger;
        }
    }
    Some(champion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_choose_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let empty: [u32; 0] = [];
        assert!(choose(&empty, &mut rng).is_none());
    }

    #[test]
    fn test_choose_covers_all_items() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let items = [1, 2, 3];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let picked = *choose(&items, &mut rng).unwrap();
            seen[picked - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_unit_scaled_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let v = unit_scaled(0.08, &mut rng);
            assert!((0.0..0.08).contains(&v));
        }
        assert_eq!(unit_scaled(0.0, &mut rng), 0.0);
    }

    #[test]
    fn test_chance_edges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(!chance(0.0, &mut rng));
            assert!(chance(1.0, &mut rng));
        }
    }

    #[test]
    fn test_noiseless_max_is_first_maximum() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let items = [(0, 0.1), (1, 0.9), (2, 0.9), (3, 0.4)];
        let head = noisy_max_by_key(&items, 0.0, &mut rng, |(_, s)| *s).unwrap();
        assert_eq!(head.0, 1);
    }

    #[test]
    fn test_large_gap_survives_noise() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let items = [(0, 0.0), (1, 2.0), (2, 0.5)];
        for _ in 0..200 {
            let head = noisy_max_by_key(&items, 0.5, &mut rng, |(_, s)| *s).unwrap();
            assert_eq!(head.0, 1);
        }
    }

    #[test]
    fn test_small_gap_is_sometimes_overturned() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let items = [(0, 0.30), (1, 0.50)];
        let mut picks = [0u32; 2];
        for _ in 0..500 {
            let head = noisy_max_by_key(&items, 0.5, &mut rng, |(_, s)| *s).unwrap();
            picks[head.0] += 1;
        }
        assert!(picks[0] > 0 && picks[1] > 0);
        assert!(picks[1] > picks[0]);
    }
}
