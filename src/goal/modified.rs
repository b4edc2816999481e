//! Fuzzy clusterings driven by the modified colony, whose exploration draws
//! on four informants in the manner of differential evolution.

use std::sync::Arc;

use rand::Rng;
use typed_builder::TypedBuilder;

use crate::{
  candidate::{Candidate, DifferentialExplore, Objective},
  goal::{
    centroid_compactness,
    normalize,
    random_memberships,
    reciprocal,
    Membership,
    Point,
    CLUSTERS,
  },
  score::Fitness,
};

/// Problem parameters for [`ModifiedFuzzyClustering`].
#[derive(TypedBuilder, Clone, Debug)]
pub struct ModifiedFuzzyParams {
  /// The data vectors to cluster.
  pub vectors: Arc<Vec<Point>>,
  /// Differential weight applied to both informant differences.
  pub f: f64,
  /// Mixing rate: the probability that any given membership row is replaced
  /// in one exploration step.
  pub mr: f64,
}

/// The differential membership move: best-known row plus `f` times the
/// own-to-buddy and peer-to-peer differences, clipped and renormalized.
fn differential_row(
  gmax: &Membership,
  own: &Membership,
  buddy: &Membership,
  rando1: &Membership,
  rando2: &Membership,
  f: f64,
) -> Membership {
  let mut row = [0.0; CLUSTERS];
  for cluster in 0..CLUSTERS {
    let step = gmax[cluster]
      + f * (own[cluster] - buddy[cluster])
      + f * (rando1[cluster] - rando2[cluster]);
    row[cluster] = step.clamp(0.0, 1.0);
  }
  normalize(&mut row);
  row
}

/// A fuzzy clustering whose exploration replaces each membership row with
/// probability `mr` by the differential combination of the best-known
/// candidate and three peers.
#[derive(Clone, Debug)]
pub struct ModifiedFuzzyClustering {
  weights: Vec<Membership>,
  params: ModifiedFuzzyParams,
}

impl ModifiedFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for ModifiedFuzzyClustering {
  type Params = ModifiedFuzzyParams;

  fn generate<R: Rng>(params: &ModifiedFuzzyParams, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(params.vectors.len(), rng),
      params: params.clone(),
    }
  }

  fn params(&self) -> &ModifiedFuzzyParams {
    &self.params
  }
}

impl Objective for ModifiedFuzzyClustering {
  fn fitness(&self) -> Fitness {
    reciprocal(centroid_compactness(&self.weights, &self.params.vectors))
  }
}

impl DifferentialExplore for ModifiedFuzzyClustering {
  fn explore<R: Rng>(
    &self,
    gmax: &Self,
    buddy: &Self,
    rando1: &Self,
    rando2: &Self,
    rng: &mut R,
  ) -> Self {
    let mut hybrid = self.clone();
    for mixed in 0..hybrid.weights.len() {
      if rng.gen::<f64>() <= self.params.mr {
        hybrid.weights[mixed] = differential_row(
          &gmax.weights[mixed],
          &self.weights[mixed],
          &buddy.weights[mixed],
          &rando1.weights[mixed],
          &rando2.weights[mixed],
          self.params.f,
        );
      }
    }
    hybrid
  }
}

/// Problem parameters for [`DifferentialFuzzyClustering`].
#[derive(TypedBuilder, Clone, Debug)]
pub struct DifferentialFuzzyParams {
  /// The data vectors to cluster.
  pub vectors: Arc<Vec<Point>>,
  /// Differential weight applied to both informant differences.
  pub f: f64,
}

/// A fuzzy clustering whose exploration applies the differential move to a
/// single random membership row.
#[derive(Clone, Debug)]
pub struct DifferentialFuzzyClustering {
  weights: Vec<Membership>,
  params: DifferentialFuzzyParams,
}

impl DifferentialFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for DifferentialFuzzyClustering {
  type Params = DifferentialFuzzyParams;

  fn generate<R: Rng>(params: &DifferentialFuzzyParams, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(params.vectors.len(), rng),
      params: params.clone(),
    }
  }

  fn params(&self) -> &DifferentialFuzzyParams {
    &self.params
  }
}

impl Objective for DifferentialFuzzyClustering {
  fn fitness(&self) -> Fitness {
    reciprocal(centroid_compactness(&self.weights, &self.params.vectors))
  }
}

impl DifferentialExplore for DifferentialFuzzyClustering {
  fn explore<R: Rng>(
    &self,
    gmax: &Self,
    buddy: &Self,
    rando1: &Self,
    rando2: &Self,
    rng: &mut R,
  ) -> Self {
    let mut hybrid = self.clone();
    let mixed = rng.gen_range(0..hybrid.weights.len());
    hybrid.weights[mixed] = differential_row(
      &gmax.weights[mixed],
      &self.weights[mixed],
      &buddy.weights[mixed],
      &rando1.weights[mixed],
      &rando2.weights[mixed],
      self.params.f,
    );
    hybrid
  }
}

/// Problem parameters for [`FastExploreFuzzyClustering`].
#[derive(TypedBuilder, Clone, Debug)]
pub struct FastExploreFuzzyParams {
  /// The data vectors to cluster.
  pub vectors: Arc<Vec<Point>>,
  /// Mixing rate: the probability that any given membership row is perturbed
  /// in one exploration step.
  pub mr: f64,
}

/// A fuzzy clustering that perturbs many membership rows per step with the
/// classic two-informant move, but keeps the modified colony's selection
/// machinery. The best-known candidate and the extra peers are accepted and
/// ignored.
#[derive(Clone, Debug)]
pub struct FastExploreFuzzyClustering {
  weights: Vec<Membership>,
  params: FastExploreFuzzyParams,
}

impl FastExploreFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for FastExploreFuzzyClustering {
  type Params = FastExploreFuzzyParams;

  fn generate<R: Rng>(params: &FastExploreFuzzyParams, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(params.vectors.len(), rng),
      params: params.clone(),
    }
  }

  fn params(&self) -> &FastExploreFuzzyParams {
    &self.params
  }
}

impl Objective for FastExploreFuzzyClustering {
  fn fitness(&self) -> Fitness {
    reciprocal(centroid_compactness(&self.weights, &self.params.vectors))
  }
}

impl DifferentialExplore for FastExploreFuzzyClustering {
  fn explore<R: Rng>(
    &self,
    _gmax: &Self,
    buddy: &Self,
    _rando1: &Self,
    _rando2: &Self,
    rng: &mut R,
  ) -> Self {
    let mut mixings: Vec<bool> = (0..self.weights.len())
      .map(|_| rng.gen::<f64>() <= self.params.mr)
      .collect();
    // at least one row always moves, otherwise the step would be a no-op
    // draining the source's patience for nothing
    if mixings.iter().all(|mixing| !mixing) {
      let idx = rng.gen_range(0..mixings.len());
      mixings[idx] = true;
    }
    let mut hybrid = self.clone();
    for (mixed, _) in mixings.iter().enumerate().filter(|(_, m)| **m) {
      let phi = rng.gen_range(-1.0..1.0);
      let mut row = [0.0; CLUSTERS];
      for cluster in 0..CLUSTERS {
        let own = self.weights[mixed][cluster];
        let step = own + phi * (own - buddy.weights[mixed][cluster]);
        row[cluster] = step.clamp(0.0, 1.0);
      }
      normalize(&mut row);
      hybrid.weights[mixed] = row;
    }
    hybrid
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::sample_vectors;

  #[test]
  fn test_zero_mixing_rate_leaves_modified_candidate_unchanged() {
    let mut rng = StdRng::seed_from_u64(31);
    let params = ModifiedFuzzyParams::builder()
      .vectors(Arc::new(sample_vectors(&mut rng)))
      .f(0.5)
      .mr(0.0)
      .build();
    let own = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let gmax = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let buddy = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let r1 = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let r2 = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let hybrid = own.explore(&gmax, &buddy, &r1, &r2, &mut rng);
    assert_eq!(hybrid.weights(), own.weights());
  }

  #[test]
  fn test_differential_explore_touches_a_single_row() {
    let mut rng = StdRng::seed_from_u64(32);
    let params = DifferentialFuzzyParams::builder()
      .vectors(Arc::new(sample_vectors(&mut rng)))
      .f(0.5)
      .build();
    let own = DifferentialFuzzyClustering::generate(&params, &mut rng);
    let gmax = DifferentialFuzzyClustering::generate(&params, &mut rng);
    let buddy = DifferentialFuzzyClustering::generate(&params, &mut rng);
    let r1 = DifferentialFuzzyClustering::generate(&params, &mut rng);
    let r2 = DifferentialFuzzyClustering::generate(&params, &mut rng);
    let hybrid = own.explore(&gmax, &buddy, &r1, &r2, &mut rng);
    let changed = own
      .weights()
      .iter()
      .zip(hybrid.weights())
      .filter(|(a, b)| a != b)
      .count();
    assert_eq!(changed, 1);
  }

  #[test]
  fn test_fast_explore_moves_at_least_one_row() {
    let mut rng = StdRng::seed_from_u64(33);
    let params = FastExploreFuzzyParams::builder()
      .vectors(Arc::new(sample_vectors(&mut rng)))
      .mr(0.0)
      .build();
    let own = FastExploreFuzzyClustering::generate(&params, &mut rng);
    let buddy = FastExploreFuzzyClustering::generate(&params, &mut rng);
    let hybrid = own.explore(&own, &buddy, &own, &own, &mut rng);
    let changed = own
      .weights()
      .iter()
      .zip(hybrid.weights())
      .filter(|(a, b)| a != b)
      .count();
    assert_eq!(changed, 1);
  }

  #[test]
  fn test_rows_stay_normalized_through_differential_steps() {
    let mut rng = StdRng::seed_from_u64(34);
    let params = ModifiedFuzzyParams::builder()
      .vectors(Arc::new(sample_vectors(&mut rng)))
      .f(0.8)
      .mr(0.7)
      .build();
    let mut own = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let gmax = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let buddy = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let r1 = ModifiedFuzzyClustering::generate(&params, &mut rng);
    let r2 = ModifiedFuzzyClustering::generate(&params, &mut rng);
    for _ in 0..20 {
      own = own.explore(&gmax, &buddy, &r1, &r2, &mut rng);
    }
    for row in own.weights() {
      let total: f64 = row.iter().sum();
      assert!((total - 1.0).abs() < 1e-9);
    }
  }
}
