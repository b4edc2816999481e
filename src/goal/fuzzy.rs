//! Fuzzy clusterings driven by the simple colony: a membership matrix,
//! scored three different ways.

use std::sync::Arc;

use rand::Rng;
use typed_builder::TypedBuilder;

use crate::{
  candidate::{Candidate, Explore, Objective},
  goal::{
    centroid_compactness,
    explore_membership_row,
    neighbor_disagreement,
    normalize,
    random_memberships,
    reciprocal,
    weighted_center_distance,
    Membership,
    NeighborParams,
    Point,
    CLUSTERS,
  },
  score::Fitness,
};

/// A fuzzy clustering scored by compactness around its implicit weighted
/// centroids.
#[derive(Clone, Debug)]
pub struct FuzzyClustering {
  weights: Vec<Membership>,
  vectors: Arc<Vec<Point>>,
}

impl FuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for FuzzyClustering {
  type Params = Arc<Vec<Point>>;

  fn generate<R: Rng>(vectors: &Arc<Vec<Point>>, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(vectors.len(), rng),
      vectors: Arc::clone(vectors),
    }
  }

  fn params(&self) -> &Arc<Vec<Point>> {
    &self.vectors
  }
}

impl Objective for FuzzyClustering {
  fn fitness(&self) -> Fitness {
    reciprocal(centroid_compactness(&self.weights, &self.vectors))
  }
}

impl Explore for FuzzyClustering {
  /// Moves one random vector's row along its difference to the buddy's row,
  /// scaled by a single draw from U(-1, 1), clipped to the unit interval and
  /// renormalized.
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    let mut hybrid = self.clone();
    let mixed = rng.gen_range(0..hybrid.weights.len());
    let phi = rng.gen_range(-1.0..1.0);
    let mut row = [0.0; CLUSTERS];
    for cluster in 0..CLUSTERS {
      let own = self.weights[mixed][cluster];
      let step = own + phi * (own - buddy.weights[mixed][cluster]);
      row[cluster] = step.clamp(0.0, 1.0);
    }
    normalize(&mut row);
    hybrid.weights[mixed] = row;
    hybrid
  }
}

/// A fuzzy clustering scored by how much each vector's memberships disagree
/// with those of its nearest neighbors. No centers at all: the score only
/// rewards locally smooth membership fields.
#[derive(Clone, Debug)]
pub struct NeighborFuzzyClustering {
  weights: Vec<Membership>,
  params: NeighborParams,
}

impl NeighborFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for NeighborFuzzyClustering {
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

impl Objective for NeighborFuzzyClustering {
  fn fitness(&self) -> Fitness {
    reciprocal(neighbor_disagreement(&self.weights, &self.params.neighbors))
  }
}

impl Explore for NeighborFuzzyClustering {
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    Self {
      weights: explore_membership_row(&self.weights, &buddy.weights, rng),
      params: self.params.clone(),
    }
  }
}

/// Problem parameters for [`CenteredFuzzyClustering`]: the data vectors plus
/// fixed cluster centers the search never moves.
#[derive(TypedBuilder, Clone, Debug)]
pub struct CenteredParams {
  /// The data vectors to cluster.
  pub vectors: Arc<Vec<Point>>,
  /// Fixed cluster centers.
  pub centers: [Point; CLUSTERS],
}

/// A fuzzy clustering over fixed, externally chosen centers; only the
/// membership matrix is searched.
#[derive(Clone, Debug)]
pub struct CenteredFuzzyClustering {
  weights: Vec<Membership>,
  params: CenteredParams,
}

impl CenteredFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }
}

impl Candidate for CenteredFuzzyClustering {
  type Params = CenteredParams;

  fn generate<R: Rng>(params: &CenteredParams, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(params.vectors.len(), rng),
      params: params.clone(),
    }
  }

  fn params(&self) -> &CenteredParams {
    &self.params
  }
}

impl Objective for CenteredFuzzyClustering {
  fn fitness(&self) -> Fitness {
    reciprocal(weighted_center_distance(
      &self.weights,
      &self.params.vectors,
      &self.params.centers,
    ))
  }
}

impl Explore for CenteredFuzzyClustering {
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    Self {
      weights: explore_membership_row(&self.weights, &buddy.weights, rng),
      params: self.params.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::{nearest_neighbors, sample_vectors};

  #[test]
  fn test_rows_stay_normalized_through_exploration() {
    let mut rng = StdRng::seed_from_u64(11);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let mut own = FuzzyClustering::generate(&vectors, &mut rng);
    let buddy = FuzzyClustering::generate(&vectors, &mut rng);
    for _ in 0..50 {
      own = own.explore(&buddy, &mut rng);
    }
    for row in own.weights() {
      let total: f64 = row.iter().sum();
      assert!((total - 1.0).abs() < 1e-9);
      assert!(row.iter().all(|w| (0.0..=1.0).contains(w)));
    }
  }

  #[test]
  fn test_explore_touches_a_single_row() {
    let mut rng = StdRng::seed_from_u64(12);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let own = FuzzyClustering::generate(&vectors, &mut rng);
    let buddy = FuzzyClustering::generate(&vectors, &mut rng);
    let hybrid = own.explore(&buddy, &mut rng);
    let changed = own
      .weights()
      .iter()
      .zip(hybrid.weights())
      .filter(|(a, b)| a != b)
      .count();
    assert!(changed <= 1);
  }

  #[test]
  fn test_neighbor_fitness_rewards_agreement() {
    let vectors = Arc::new(sample_vectors(&mut StdRng::seed_from_u64(13)));
    let params = NeighborParams::builder()
      .neighbors(Arc::new(nearest_neighbors(&vectors, 5)))
      .vectors(Arc::clone(&vectors))
      .build();
    let uniform = NeighborFuzzyClustering {
      weights: vec![[0.25; CLUSTERS]; vectors.len()],
      params: params.clone(),
    };
    let scattered =
      NeighborFuzzyClustering::generate(&params, &mut StdRng::seed_from_u64(1));
    assert!(uniform.fitness() > scattered.fitness());
  }

  #[test]
  fn test_centered_fitness_prefers_memberships_near_their_centers() {
    let params = CenteredParams::builder()
      .vectors(Arc::new(vec![[0.0, 0.0], [100.0, 100.0]]))
      .centers([[0.0, 0.0], [100.0, 100.0], [50.0, 50.0], [-50.0, 50.0]])
      .build();
    let aligned = CenteredFuzzyClustering {
      weights: vec![[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0]],
      params: params.clone(),
    };
    let swapped = CenteredFuzzyClustering {
      weights: vec![[0.0, 1.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]],
      params,
    };
    assert!(aligned.fitness() > swapped.fitness());
  }
}
