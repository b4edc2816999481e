//! A fuzzy clustering with a global and a local fitness for the
//! global-local colony.

use rand::Rng;

use crate::{
  candidate::{Candidate, DualObjective},
  goal::{
    centroid_compactness,
    explore_membership_row,
    neighbor_disagreement,
    random_memberships,
    reciprocal,
    Membership,
    NeighborParams,
  },
  score::Fitness,
};

/// A fuzzy clustering scored twice over the same membership matrix: the
/// global fitness is centroid compactness over the whole data set, the local
/// fitness is membership agreement between nearest neighbors. Exploration is
/// the bounds-rule membership move either way; only the colony's acceptance
/// rule distinguishes the phases.
#[derive(Clone, Debug)]
pub struct GlobalLocalFuzzyClustering {
  weights: Vec<Membership>,
  params: NeighborParams,
}

impl GlobalLocalFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for GlobalLocalFuzzyClustering {
  type Params = NeighborParams;

  fn generate<R: Rng>(params: &NeighborParams, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(params.vectors.len(), rng),
      params: params.clone(),
    }
  }

  fn params(&self) -> &NeighborParams {
    &self.params
  }
}

impl DualObjective for GlobalLocalFuzzyClustering {
  fn global_fitness(&self) -> Fitness {
    reciprocal(centroid_compactness(&self.weights, &self.params.vectors))
  }

  fn local_fitness(&self) -> Fitness {
    reciprocal(neighbor_disagreement(&self.weights, &self.params.neighbors))
  }

  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    Self {
      weights: explore_membership_row(&self.weights, &buddy.weights, rng),
      params: self.params.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::{nearest_neighbors, sample_vectors, CLUSTERS};

  fn params() -> NeighborParams {
    let vectors = sample_vectors(&mut StdRng::seed_from_u64(51));
    NeighborParams::builder()
      .neighbors(Arc::new(nearest_neighbors(&vectors, 5)))
      .vectors(Arc::new(vectors))
      .build()
  }

  #[test]
  fn test_both_fitness_values_are_finite_and_positive() {
    let mut rng = StdRng::seed_from_u64(52);
    let params = params();
    for _ in 0..20 {
      let candidate = GlobalLocalFuzzyClustering::generate(&params, &mut rng);
      assert!(candidate.global_fitness().is_finite());
      assert!(candidate.global_fitness() > 0.0);
      assert!(candidate.local_fitness().is_finite());
      assert!(candidate.local_fitness() > 0.0);
    }
  }

  #[test]
  fn test_uniform_memberships_maximize_local_fitness() {
    let params = params();
    let uniform = GlobalLocalFuzzyClustering {
      weights: vec![[0.25; CLUSTERS]; params.vectors.len()],
      params: params.clone(),
    };
    let random = GlobalLocalFuzzyClustering::generate(
      &params,
      &mut StdRng::seed_from_u64(53),
    );
    assert!(uniform.local_fitness() > random.local_fitness());
  }

  #[test]
  fn test_explore_keeps_rows_normalized() {
    let mut rng = StdRng::seed_from_u64(54);
    let params = params();
    let mut own = GlobalLocalFuzzyClustering::generate(&params, &mut rng);
    let buddy = GlobalLocalFuzzyClustering::generate(&params, &mut rng);
    for _ in 0..30 {
      own = own.explore(&buddy, &mut rng);
    }
    for row in own.weights() {
      let total: f64 = row.iter().sum();
      assert!((total - 1.0).abs() < 1e-9);
    }
  }
}
