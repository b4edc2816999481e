//! Type aliases and small numeric helpers for fitness values used
//! throughout the library.

/// An alias for a fitness value.
///
/// Fitness is always maximized. Every shipped goal derives it from a
/// reciprocal-distance transform, so it is finite and strictly positive by
/// construction; the colony drivers rely on that precondition when they
/// normalize fitness-proportional selection weights.
pub type Fitness = f64;

/// An alias for an array of `N` values of `Fitness` type, one per
/// sub-objective or facet.
pub type Fitnesses<const N: usize> = [Fitness; N];

/// Numerically stable softmax over a fixed-size array.
pub(crate) fn softmax<const N: usize>(values: [f64; N]) -> [f64; N] {
  let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let mut out = values.map(|v| (v - max).exp());
  let total: f64 = out.iter().sum();
  for v in &mut out {
    *v /= total;
  }
  out
}

/// Asserts, in debug builds only, that an incrementally maintained nectar
/// total still matches the fitness sum it stands for.
pub(crate) fn check_nectar(
  nectar: Fitness,
  fitnesses: impl IntoIterator<Item = Fitness>,
) {
  if cfg!(debug_assertions) {
    let total: Fitness = fitnesses.into_iter().sum();
    assert!(
      (nectar - total).abs() <= 1e-6 * total.abs().max(1.0),
      "nectar total drifted from population fitness: {nectar} vs {total}"
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_softmax_sums_to_one() {
    let out = softmax([1.0, 2.0, 3.0]);
    let total: f64 = out.iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert!(out[0] < out[1] && out[1] < out[2]);
  }

  #[test]
  fn test_softmax_handles_large_values() {
    let out = softmax([1000.0, 1001.0]);
    assert!(out.iter().all(|v| v.is_finite()));
    assert!(out[0] < out[1]);
  }

  #[test]
  fn test_check_nectar_accepts_small_drift() {
    check_nectar(6.0 + 1e-9, [1.0, 2.0, 3.0]);
  }

  #[test]
  #[should_panic(expected = "nectar total drifted")]
  fn test_check_nectar_rejects_large_drift() {
    check_nectar(7.5, [1.0, 2.0, 3.0]);
  }
}
