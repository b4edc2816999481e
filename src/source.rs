//! A source: one candidate solution plus colony bookkeeping.

use rand::Rng;

use crate::{
  candidate::{Candidate, Objective},
  score::Fitness,
};

/// One candidate being worked by a colony, together with its cached fitness
/// and its remaining patience.
///
/// Fitness evaluation may be expensive, so a source never recomputes the
/// fitness of a candidate it already holds: the candidate and its fitness
/// are always replaced together. `limit` counts the rounds a source may go
/// without improvement before the scout phase reinitializes it.
#[derive(Clone, Debug)]
pub struct Source<C: Objective> {
  /// The candidate this source currently works.
  pub candidate: C,
  /// Cached fitness of the candidate.
  pub fitness: Fitness,
  /// Remaining patience before forced reinitialization.
  pub limit: u32,
}

impl<C: Objective> Source<C> {
  /// Wraps a freshly drawn candidate with a full patience budget.
  pub fn new(limit: u32, candidate: C) -> Self {
    Self {
      fitness: candidate.fitness(),
      candidate,
      limit,
    }
  }

  /// Replaces the candidate and its cached fitness together and restores
  /// the patience budget. Called only for accepted improvements.
  pub(crate) fn adopt(&mut self, candidate: C, fitness: Fitness, limit: u32) {
    self.candidate = candidate;
    self.fitness = fitness;
    self.limit = limit;
  }

  /// Gives up on the current candidate: redraws a random one with the same
  /// problem parameters, recomputes its fitness and restores the patience
  /// budget. Returns the resulting fitness delta so the caller can keep its
  /// nectar total consistent; the delta can move in either direction.
  pub(crate) fn abandon<R: Rng>(&mut self, limit: u32, rng: &mut R) -> Fitness {
    let fresh = C::generate(self.candidate.params(), rng);
    let old_fitness = self.fitness;
    self.fitness = fresh.fitness();
    self.candidate = fresh;
    self.limit = limit;
    self.fitness - old_fitness
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  /// A candidate whose fitness is its value: a base parameter plus a fresh
  /// uniform draw, so tests can observe reinitialization.
  #[derive(Clone, Debug)]
  struct Step {
    value: f64,
    base: f64,
  }

  impl Candidate for Step {
    type Params = f64;

    fn generate<R: Rng>(params: &f64, rng: &mut R) -> Self {
      Self {
        value: params + rng.gen::<f64>(),
        base: *params,
      }
    }

    fn params(&self) -> &f64 {
      &self.base
    }
  }

  impl Objective for Step {
    fn fitness(&self) -> Fitness {
      self.value
    }
  }

  #[test]
  fn test_new_caches_fitness() {
    let source = Source::new(5, Step { value: 3.0, base: 1.0 });
    assert_eq!(source.fitness, 3.0);
    assert_eq!(source.limit, 5);
  }

  #[test]
  fn test_adopt_replaces_candidate_and_fitness_together() {
    let mut source = Source::new(5, Step { value: 3.0, base: 1.0 });
    source.limit = 0;
    source.adopt(Step { value: 4.0, base: 1.0 }, 4.0, 5);
    assert_eq!(source.fitness, 4.0);
    assert_eq!(source.candidate.value, 4.0);
    assert_eq!(source.limit, 5, "acceptance must restore patience");
  }

  #[test]
  fn test_abandon_redraws_from_own_params() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut source = Source::new(5, Step { value: 9.0, base: 2.0 });
    source.limit = 0;
    let delta = source.abandon(5, &mut rng);
    // redrawn candidates land in [base, base + 1)
    assert!((2.0..3.0).contains(&source.candidate.value));
    assert_eq!(source.fitness, source.candidate.value);
    assert!((delta - (source.fitness - 9.0)).abs() < 1e-12);
    assert_eq!(source.limit, 5, "reinitialization must restore patience");
  }
}
