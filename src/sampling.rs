//! Unbiased sampling primitives shared by the colony drivers and the
//! shipped goals.

use rand::{seq::index::sample, Rng};
use rand_distr::{Distribution, Normal};

use crate::score::Fitness;

/// Picks a uniformly random index in `0..len` that is not `excluded`.
///
/// Samples from `0..len - 1` and shifts results at or above the excluded
/// index by one, which is exactly uniform over the `len - 1` valid indices
/// and needs no retry loop.
pub fn index_except<R: Rng + ?Sized>(
  len: usize,
  excluded: usize,
  rng: &mut R,
) -> usize {
  debug_assert!(len >= 2, "cannot exclude an index from fewer than 2");
  debug_assert!(excluded < len, "excluded index out of bounds");
  let raw = rng.gen_range(0..len - 1);
  raw + usize::from(raw >= excluded)
}

/// Picks `count` distinct uniformly random indices in `0..len`, none of
/// which is `excluded`.
///
/// Applies the same shift as [`index_except`] to a uniform `count`-subset of
/// `0..len - 1`.
pub fn distinct_indices_except<R: Rng + ?Sized>(
  len: usize,
  count: usize,
  excluded: usize,
  rng: &mut R,
) -> Vec<usize> {
  debug_assert!(count < len, "not enough indices to sample from");
  debug_assert!(excluded < len, "excluded index out of bounds");
  sample(rng, len - 1, count)
    .iter()
    .map(|raw| raw + usize::from(raw >= excluded))
    .collect()
}

/// Picks an index with probability proportional to its weight.
///
/// Walks the weights subtracting them from a `U[0, total)` target until it
/// goes nonpositive; floating-point overshoot falls back to the last index.
/// `total` must be the finite, strictly positive sum of the weights, which
/// holds whenever every fitness honors the positivity contract of
/// [`Objective`](crate::candidate::Objective).
pub fn roulette<I, R>(weights: I, total: Fitness, rng: &mut R) -> usize
where
  I: IntoIterator<Item = Fitness>,
  R: Rng + ?Sized,
{
  debug_assert!(
    total.is_finite() && total > 0.0,
    "selection weights must sum to a finite positive total, got {total}"
  );
  let mut target = rng.gen_range(0.0..total);
  let mut winner = 0;
  for (index, weight) in weights.into_iter().enumerate() {
    winner = index;
    target -= weight;
    if target <= 0.0 {
      break;
    }
  }
  winner
}

/// Draws from the standard normal distribution truncated to [0, 1].
pub fn unit_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
  let normal = Normal::new(0.0, 1.0).expect("valid distribution parameters");
  loop {
    let draw = normal.sample(rng);
    if (0.0..=1.0).contains(&draw) {
      return draw;
    }
  }
}

/// Draws uniformly from `[lo, hi]`, tolerating a degenerate `lo == hi`
/// range that would panic `gen_range`.
pub fn uniform_between<R: Rng + ?Sized>(
  lo: f64,
  hi: f64,
  rng: &mut R,
) -> f64 {
  lo + (hi - lo) * rng.gen::<f64>()
}
