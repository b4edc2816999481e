//! A fuzzy clustering with two sub-objectives for the adaptive colony.

use std::sync::Arc;

use rand::Rng;

use crate::{
  candidate::{AdaptiveObjective, Candidate},
  goal::{
    assigned_center_distance,
    explore_center,
    explore_membership_row,
    random_centers,
    random_memberships,
    reciprocal,
    weighted_center_distance,
    Membership,
    Point,
    CLUSTERS,
  },
  score::Fitnesses,
};

/// A fuzzy clustering carrying both a membership matrix and explicit
/// centers, scored by two sub-objectives: how well the memberships fit the
/// centers, and how well the centers fit the crisp assignments the
/// memberships imply.
///
/// Each exploration step perturbs exactly one of the two: the disposition
/// scalar is the probability of a membership move, so a source whose
/// membership sub-fitness has been outgrowing its trend keeps pushing on
/// memberships, and vice versa.
#[derive(Clone, Debug)]
pub struct AdaptiveFuzzyClustering {
  weights: Vec<Membership>,
  centers: [Point; CLUSTERS],
  vectors: Arc<Vec<Point>>,
}

impl AdaptiveFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }

  /// The cluster centers.
  pub fn centers(&self) -> &[Point; CLUSTERS] {
    &self.centers
  }
}

impl Candidate for AdaptiveFuzzyClustering {
  type Params = Arc<Vec<Point>>;

  fn generate<R: Rng>(vectors: &Arc<Vec<Point>>, rng: &mut R) -> Self {
    Self {
      weights: random_memberships(vectors.len(), rng),
      centers: random_centers(rng),
      vectors: Arc::clone(vectors),
    }
  }

  fn params(&self) -> &Arc<Vec<Point>> {
    &self.vectors
  }
}

impl AdaptiveObjective<2> for AdaptiveFuzzyClustering {
  fn fitnesses(&self) -> Fitnesses<2> {
    [
      reciprocal(weighted_center_distance(
        &self.weights,
        &self.vectors,
        &self.centers,
      )),
      reciprocal(assigned_center_distance(
        &self.weights,
        &self.vectors,
        &self.centers,
      )),
    ]
  }

  fn explore<R: Rng>(
    &self,
    buddy: &Self,
    disposition: f64,
    rng: &mut R,
  ) -> Self {
    if rng.gen::<f64>() < disposition {
      Self {
        weights: explore_membership_row(&self.weights, &buddy.weights, rng),
        centers: self.centers,
        vectors: Arc::clone(&self.vectors),
      }
    } else {
      Self {
        weights: self.weights.clone(),
        centers: explore_center(&self.centers, &buddy.centers, rng),
        vectors: Arc::clone(&self.vectors),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::sample_vectors;

  #[test]
  fn test_fitnesses_are_finite_and_positive() {
    let mut rng = StdRng::seed_from_u64(41);
    let vectors = Arc::new(sample_vectors(&mut rng));
    for _ in 0..20 {
      let candidate = AdaptiveFuzzyClustering::generate(&vectors, &mut rng);
      for fitness in candidate.fitnesses() {
        assert!(fitness.is_finite() && fitness > 0.0);
      }
    }
  }

  #[test]
  fn test_disposition_extremes_pick_the_matching_move() {
    let mut rng = StdRng::seed_from_u64(42);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let own = AdaptiveFuzzyClustering::generate(&vectors, &mut rng);
    let buddy = AdaptiveFuzzyClustering::generate(&vectors, &mut rng);
    for _ in 0..10 {
      let weights_move = own.explore(&buddy, 1.0, &mut rng);
      assert_eq!(weights_move.centers, own.centers);
      assert_ne!(weights_move.weights, own.weights);
      let centers_move = own.explore(&buddy, 0.0, &mut rng);
      assert_eq!(centers_move.weights, own.weights);
      assert_ne!(centers_move.centers, own.centers);
    }
  }
}
