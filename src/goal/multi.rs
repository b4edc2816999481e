//! A two-facet fuzzy clustering for the multi-facet colony: memberships and
//! centers evolve as independently accepted slices of one candidate.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::{
  candidate::{Candidate, Facet, Faceted},
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
  score::Fitness,
};

/// A fuzzy clustering whose membership matrix and centers are separate
/// facets: each is scored, perturbed and accepted on its own, so a good
/// membership move survives even when the same step's center move is a dud.
///
/// The membership facet comes first, so its fitness is the one driving
/// selection and best tracking in the colony.
#[derive(Clone, Debug)]
pub struct MultiFuzzyClustering {
  weights: Vec<Membership>,
  centers: [Point; CLUSTERS],
  vectors: Arc<Vec<Point>>,
}

impl MultiFuzzyClustering {
  /// The membership matrix, one row per data vector.
  pub fn weights(&self) -> &[Membership] {
    &self.weights
  }

  /// The cluster centers.
  pub fn centers(&self) -> &[Point; CLUSTERS] {
    &self.centers
  }

  fn weight_fitness(&self) -> Fitness {
    reciprocal(weighted_center_distance(
      &self.weights,
      &self.vectors,
      &self.centers,
    ))
  }

  fn center_fitness(&self) -> Fitness {
    reciprocal(assigned_center_distance(
      &self.weights,
      &self.vectors,
      &self.centers,
    ))
  }

  fn explore_weights(&self, buddy: &Self, rng: &mut dyn RngCore) -> Self {
    Self {
      weights: explore_membership_row(&self.weights, &buddy.weights, rng),
      centers: self.centers,
      vectors: Arc::clone(&self.vectors),
    }
  }

  fn explore_centers(&self, buddy: &Self, rng: &mut dyn RngCore) -> Self {
    Self {
      weights: self.weights.clone(),
      centers: explore_center(&self.centers, &buddy.centers, rng),
      vectors: Arc::clone(&self.vectors),
    }
  }
}

impl Candidate for MultiFuzzyClustering {
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

impl Faceted<2> for MultiFuzzyClustering {
  fn facets() -> [Facet<Self>; 2] {
    [
      Facet {
        fitness: Self::weight_fitness,
        explore: Self::explore_weights,
        commit: |own, trial| own.weights = trial.weights,
      },
      Facet {
        fitness: Self::center_fitness,
        explore: Self::explore_centers,
        commit: |own, trial| own.centers = trial.centers,
      },
    ]
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::sample_vectors;

  #[test]
  fn test_each_facet_perturbs_only_its_own_slice() {
    let mut rng = StdRng::seed_from_u64(61);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let own = MultiFuzzyClustering::generate(&vectors, &mut rng);
    let buddy = MultiFuzzyClustering::generate(&vectors, &mut rng);
    let [weights_facet, centers_facet] = MultiFuzzyClustering::facets();
    let weights_trial = (weights_facet.explore)(&own, &buddy, &mut rng);
    assert_eq!(weights_trial.centers, own.centers);
    assert_ne!(weights_trial.weights, own.weights);
    let centers_trial = (centers_facet.explore)(&own, &buddy, &mut rng);
    assert_eq!(centers_trial.weights, own.weights);
    assert_ne!(centers_trial.centers, own.centers);
  }

  #[test]
  fn test_commit_overwrites_only_the_facet_slice() {
    let mut rng = StdRng::seed_from_u64(62);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let mut own = MultiFuzzyClustering::generate(&vectors, &mut rng);
    let trial = MultiFuzzyClustering::generate(&vectors, &mut rng);
    let old_centers = own.centers;
    let [weights_facet, _] = MultiFuzzyClustering::facets();
    (weights_facet.commit)(&mut own, trial.clone());
    assert_eq!(own.weights, trial.weights);
    assert_eq!(own.centers, old_centers);
  }

  #[test]
  fn test_facet_fitness_values_are_finite_and_positive() {
    let mut rng = StdRng::seed_from_u64(63);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let candidate = MultiFuzzyClustering::generate(&vectors, &mut rng);
    for facet in MultiFuzzyClustering::facets() {
      let fitness = (facet.fitness)(&candidate);
      assert!(fitness.is_finite() && fitness > 0.0);
    }
  }
}
