//! The optimization targets the shipped demos and tests run the colonies
//! on: fuzzy and crisp clustering of 2D points into four clusters, plus
//! scalar toy targets.
//!
//! The colony drivers never look inside these types; everything here is an
//! ordinary implementation of the traits in [`candidate`](crate::candidate)
//! and can serve as a template for user-defined targets. All fitness values
//! are reciprocals of accumulated distances or dissimilarities, clamped
//! away from a zero denominator, so they honor the finite-and-positive
//! contract the drivers rely on.

pub mod adaptive;
pub mod clustering;
pub mod fuzzy;
pub mod global_local;
pub mod meaning;
pub mod modified;
pub mod multi;

use std::sync::Arc;

use itertools::{izip, Itertools};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use typed_builder::TypedBuilder;

use crate::{
  sampling::{uniform_between, unit_normal},
  score::Fitness,
};

/// A data vector to cluster.
pub type Point = [f64; 2];

/// Number of clusters every shipped clustering goal partitions into.
pub const CLUSTERS: usize = 4;

/// One vector's membership degrees, one entry per cluster, summing to 1.
pub type Membership = [f64; CLUSTERS];

/// Problem parameters for the neighbor-aware goals: the data vectors plus a
/// precomputed nearest-neighbor table.
#[derive(TypedBuilder, Clone, Debug)]
pub struct NeighborParams {
  /// The data vectors to cluster.
  pub vectors: Arc<Vec<Point>>,
  /// For each vector, the indices of its nearest neighbors.
  pub neighbors: Arc<Vec<Vec<usize>>>,
}

pub(crate) fn euclidean(a: &Point, b: &Point) -> f64 {
  let dx = a[0] - b[0];
  let dy = a[1] - b[1];
  (dx * dx + dy * dy).sqrt()
}

/// Reciprocal-distance fitness transform, clamped so a degenerate zero
/// accumulation still yields a finite positive fitness.
pub(crate) fn reciprocal(total: f64) -> Fitness {
  1.0 / total.max(1e-12)
}

/// Renormalizes a membership row to sum 1, falling back to the uniform row
/// when clipping has zeroed it out entirely.
pub(crate) fn normalize(row: &mut Membership) {
  let total: f64 = row.iter().sum();
  if total > 0.0 {
    for weight in row.iter_mut() {
      *weight /= total;
    }
  } else {
    *row = [1.0 / CLUSTERS as f64; CLUSTERS];
  }
}

/// Draws one membership row from truncated normals, normalized to sum 1.
pub(crate) fn random_membership<R: Rng>(rng: &mut R) -> Membership {
  let mut row = [0.0; CLUSTERS];
  for weight in row.iter_mut() {
    *weight = unit_normal(rng);
  }
  normalize(&mut row);
  row
}

/// Draws the full membership matrix, one row per data vector.
pub(crate) fn random_memberships<R: Rng>(
  count: usize,
  rng: &mut R,
) -> Vec<Membership> {
  (0..count).map(|_| random_membership(rng)).collect()
}

/// Draws random cluster centers: uniform on [-90, 90)² scaled by a
/// truncated-normal draw.
pub(crate) fn random_centers<R: Rng>(rng: &mut R) -> [Point; CLUSTERS] {
  let mut centers = [[0.0; 2]; CLUSTERS];
  for center in centers.iter_mut() {
    let scale = unit_normal(rng);
    for coordinate in center.iter_mut() {
      *coordinate = (rng.gen::<f64>() * 180.0 - 90.0) * scale;
    }
  }
  centers
}

/// Exploration bounds for a membership row against a buddy's row.
///
/// Preserves the spirit of the classic ABC move on the unit interval:
/// either step to the buddy's value or move away from it by the same
/// proportion of the room left on the own side.
pub(crate) fn explore_bounds(
  own: &Membership,
  buddy: &Membership,
) -> (Membership, Membership) {
  let mut lower = [0.0; CLUSTERS];
  let mut upper = [0.0; CLUSTERS];
  for cluster in 0..CLUSTERS {
    let a = own[cluster];
    let b = buddy[cluster];
    upper[cluster] = b.max(a + (1.0 - a) * (a - b) / (a + 1e-8));
    lower[cluster] = b.min(a - a * (b - a) / (1.0 - a + 1e-8));
  }
  (lower, upper)
}

/// Compactness of a fuzzy clustering around its implicit weighted
/// centroids: the membership-weighted distance of every vector to the
/// centroid of every cluster.
pub(crate) fn centroid_compactness(
  weights: &[Membership],
  vectors: &[Point],
) -> f64 {
  let mut total = 0.0;
  for cluster in 0..CLUSTERS {
    let mut centroid = [0.0; 2];
    let mut mass = 0.0;
    for (row, vector) in weights.iter().zip(vectors) {
      centroid[0] += row[cluster] * vector[0];
      centroid[1] += row[cluster] * vector[1];
      mass += row[cluster];
    }
    centroid[0] /= mass;
    centroid[1] /= mass;
    for (row, vector) in weights.iter().zip(vectors) {
      total += row[cluster] * euclidean(vector, &centroid);
    }
  }
  total
}

/// Total membership disagreement between every vector and its nearest
/// neighbors.
pub(crate) fn neighbor_disagreement(
  weights: &[Membership],
  neighbors: &[Vec<usize>],
) -> f64 {
  let mut total = 0.0;
  for (row, peers) in weights.iter().zip(neighbors) {
    for &peer in peers {
      for cluster in 0..CLUSTERS {
        total += (row[cluster] - weights[peer][cluster]).abs();
      }
    }
  }
  total
}

/// Membership-weighted distance of every vector to a set of explicit
/// cluster centers.
pub(crate) fn weighted_center_distance(
  weights: &[Membership],
  vectors: &[Point],
  centers: &[Point; CLUSTERS],
) -> f64 {
  izip!(weights, vectors)
    .map(|(row, vector)| {
      izip!(row, centers)
        .map(|(weight, center)| weight * euclidean(vector, center))
        .sum::<f64>()
    })
    .sum()
}

/// Distance of every vector to the center of the cluster its strongest
/// membership assigns it to.
pub(crate) fn assigned_center_distance(
  weights: &[Membership],
  vectors: &[Point],
  centers: &[Point; CLUSTERS],
) -> f64 {
  izip!(weights, vectors)
    .map(|(row, vector)| {
      let assigned = row
        .iter()
        .position_max_by(|a, b| a.total_cmp(b))
        .expect("membership row is not empty");
      euclidean(vector, &centers[assigned])
    })
    .sum()
}

/// The classic bounds-rule membership exploration: perturbs one random
/// vector's row within [`explore_bounds`] of the buddy's row and
/// renormalizes it.
pub(crate) fn explore_membership_row<R: Rng + ?Sized>(
  weights: &[Membership],
  buddy: &[Membership],
  rng: &mut R,
) -> Vec<Membership> {
  let mut hybrid = weights.to_vec();
  let mixed = rng.gen_range(0..hybrid.len());
  let (lower, upper) = explore_bounds(&weights[mixed], &buddy[mixed]);
  let mut row = [0.0; CLUSTERS];
  for cluster in 0..CLUSTERS {
    row[cluster] = uniform_between(lower[cluster], upper[cluster], rng);
  }
  normalize(&mut row);
  hybrid[mixed] = row;
  hybrid
}

/// Moves one random center along its difference to the buddy's center.
pub(crate) fn explore_center<R: Rng + ?Sized>(
  centers: &[Point; CLUSTERS],
  buddy: &[Point; CLUSTERS],
  rng: &mut R,
) -> [Point; CLUSTERS] {
  let mut hybrid = *centers;
  let mixed = rng.gen_range(0..CLUSTERS);
  let phi = rng.gen_range(-1.0..1.0);
  for coordinate in 0..2 {
    hybrid[mixed][coordinate] +=
      phi * (centers[mixed][coordinate] - buddy[mixed][coordinate]);
  }
  hybrid
}

/// Builds the `n`-nearest-neighbor table of a point set.
pub fn nearest_neighbors(vectors: &[Point], n: usize) -> Vec<Vec<usize>> {
  vectors
    .iter()
    .enumerate()
    .map(|(own, vector)| {
      vectors
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != own)
        .map(|(other, peer)| (euclidean(vector, peer), other))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .take(n)
        .map(|(_, other)| other)
        .collect()
    })
    .collect()
}

/// Draws a sample data set: 80 points in four Gaussian blobs, the shape the
/// shipped demos and tests cluster.
pub fn sample_vectors<R: Rng>(rng: &mut R) -> Vec<Point> {
  let blobs: [Point; CLUSTERS] =
    [[-50.0, -50.0], [-50.0, 50.0], [50.0, -50.0], [50.0, 50.0]];
  let spread = Normal::new(0.0, 12.0).expect("valid distribution parameters");
  let mut vectors = Vec::with_capacity(80);
  for blob in blobs {
    for _ in 0..20 {
      vectors
        .push([blob[0] + spread.sample(rng), blob[1] + spread.sample(rng)]);
    }
  }
  vectors
}
