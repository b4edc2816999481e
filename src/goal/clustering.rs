//! Crisp clustering: hard assignments plus explicit centers.

use std::sync::Arc;

use rand::Rng;

use crate::{
  candidate::{Candidate, Explore, Objective},
  goal::{euclidean, random_centers, reciprocal, Point, CLUSTERS},
  score::Fitness,
};

/// A crisp clustering of the data vectors: every vector is assigned to
/// exactly one cluster, and every cluster has an explicit center.
#[derive(Clone, Debug)]
pub struct Clustering {
  assignments: Vec<usize>,
  centers: [Point; CLUSTERS],
  vectors: Arc<Vec<Point>>,
}

impl Clustering {
  /// The cluster each vector is assigned to.
  pub fn assignments(&self) -> &[usize] {
    &self.assignments
  }

  /// The cluster centers.
  pub fn centers(&self) -> &[Point; CLUSTERS] {
    &self.centers
  }
}

impl Candidate for Clustering {
  type Params = Arc<Vec<Point>>;

  fn generate<R: Rng>(vectors: &Arc<Vec<Point>>, rng: &mut R) -> Self {
    Self {
      assignments: (0..vectors.len())
        .map(|_| rng.gen_range(0..CLUSTERS))
        .collect(),
      centers: random_centers(rng),
      vectors: Arc::clone(vectors),
    }
  }

  fn params(&self) -> &Arc<Vec<Point>> {
    &self.vectors
  }
}

impl Objective for Clustering {
  fn fitness(&self) -> Fitness {
    let total: f64 = self
      .vectors
      .iter()
      .zip(&self.assignments)
      .map(|(vector, &cluster)| euclidean(vector, &self.centers[cluster]))
      .sum();
    reciprocal(total)
  }
}

impl Explore for Clustering {
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    let mut hybrid = self.clone();
    if rng.gen::<bool>() {
      // take over the buddy's assignment of one random vector
      let exchanged = rng.gen_range(0..hybrid.assignments.len());
      hybrid.assignments[exchanged] = buddy.assignments[exchanged];
    } else {
      // move one random center along its difference to the buddy's
      let mixed = rng.gen_range(0..CLUSTERS);
      let phi = rng.gen_range(-1.0..1.0);
      for coordinate in 0..2 {
        hybrid.centers[mixed][coordinate] += phi
          * (self.centers[mixed][coordinate]
            - buddy.centers[mixed][coordinate]);
      }
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
  fn test_tighter_clustering_scores_higher() {
    let vectors = Arc::new(vec![[0.0, 0.0], [1.0, 0.0], [10.0, 10.0]]);
    let tight = Clustering {
      assignments: vec![0, 0, 1],
      centers: [[0.5, 0.0], [10.0, 10.0], [0.0, 0.0], [0.0, 0.0]],
      vectors: Arc::clone(&vectors),
    };
    let loose = Clustering {
      assignments: vec![0, 1, 2],
      centers: [[5.0, 5.0], [-5.0, 5.0], [0.0, -7.0], [0.0, 0.0]],
      vectors,
    };
    assert!(tight.fitness() > loose.fitness());
  }

  #[test]
  fn test_explore_changes_one_aspect_only() {
    let mut rng = StdRng::seed_from_u64(3);
    let vectors = Arc::new(sample_vectors(&mut rng));
    let own = Clustering::generate(&vectors, &mut rng);
    let buddy = Clustering::generate(&vectors, &mut rng);
    for _ in 0..20 {
      let hybrid = own.explore(&buddy, &mut rng);
      let assignments_changed = hybrid.assignments != own.assignments;
      let centers_changed = hybrid.centers != own.centers;
      assert!(
        !(assignments_changed && centers_changed),
        "one explore step must touch assignments or centers, not both"
      );
    }
  }
}
