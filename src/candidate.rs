//! The candidate contract consumed by the colony drivers.
//!
//! A **candidate** is one point in the search space of an optimization
//! target. The colonies never inspect a candidate's internals: they drive it
//! exclusively through the traits of this module. The base [`Candidate`]
//! trait covers random construction and parameter introspection; each colony
//! variant then demands one additional capability trait matching its
//! acceptance rule.
//!
//! Implementations must uphold two contracts the drivers cannot check for
//! them:
//! - every fitness value is finite and strictly positive (the shipped goals
//!   guarantee this with reciprocal-distance transforms), otherwise the
//!   fitness-proportional selection weights degenerate;
//! - `explore` returns a fully independent value sharing no mutable backing
//!   storage with either input, since the drivers cache fitness alongside
//!   candidates and a silent alias would desynchronize the two.

use rand::{Rng, RngCore};

use crate::score::{Fitness, Fitnesses};

/// A point in the search space of an optimization target.
pub trait Candidate: Clone {
  /// Immutable problem parameters needed to draw fresh candidates, e.g. the
  /// fixed data vectors of a clustering problem.
  type Params;

  /// Draws a fresh random candidate for the given problem parameters.
  fn generate<R: Rng>(params: &Self::Params, rng: &mut R) -> Self;

  /// The construction parameters this candidate was drawn with, used to
  /// redraw it when its source is abandoned.
  fn params(&self) -> &Self::Params;
}

/// A candidate scored by a single scalar fitness.
pub trait Objective: Candidate {
  /// Fitness of this candidate; higher is better.
  fn fitness(&self) -> Fitness;
}

/// A candidate that derives trial candidates from itself and a single buddy.
pub trait Explore: Objective {
  /// Produces a new candidate from `self` and `buddy` without mutating
  /// either.
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self;
}

/// A candidate that derives trial candidates DE-style from four informants:
/// the best-known candidate and three random distinct peers.
pub trait DifferentialExplore: Objective {
  /// Produces a new candidate from `self`, the best-known candidate `gmax`
  /// and three distinct peers, mutating none of them.
  fn explore<R: Rng>(
    &self,
    gmax: &Self,
    buddy: &Self,
    rando1: &Self,
    rando2: &Self,
    rng: &mut R,
  ) -> Self;
}

/// A candidate scored by `N` sub-objectives and perturbed under the guidance
/// of a disposition scalar.
///
/// The adaptive colony treats the *product* of the sub-fitness values as the
/// scalar fitness driving selection, and derives the disposition from a
/// softmax of the sub-fitness vector over the source's trend.
pub trait AdaptiveObjective<const N: usize>: Candidate {
  /// Fitness of each sub-objective; every entry must be finite and strictly
  /// positive.
  fn fitnesses(&self) -> Fitnesses<N>;

  /// Produces a new candidate from `self` and `buddy`. `disposition` lies in
  /// [0, 1] and steers which sub-objective the perturbation favors; how it
  /// does so is entirely up to the implementation.
  fn explore<R: Rng>(&self, buddy: &Self, disposition: f64, rng: &mut R)
    -> Self;
}

/// A candidate scored by two independent fitness functions, one global and
/// one local.
pub trait DualObjective: Candidate {
  /// The global fitness of this candidate.
  fn global_fitness(&self) -> Fitness;

  /// The local fitness of this candidate.
  fn local_fitness(&self) -> Fitness;

  /// Produces a new candidate from `self` and `buddy` without mutating
  /// either. The perturbation is the same regardless of the round's phase;
  /// only the acceptance rule is phase-conditional.
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self;
}

/// One independently evaluated and independently perturbable slice of a
/// multi-part candidate's state.
///
/// A facet bundles the three operations the multi-facet colony needs:
/// scoring the slice, deriving a trial candidate whose slice moved toward a
/// buddy's, and committing an accepted trial's slice back into the source
/// candidate. The explore function must leave both of its candidate inputs
/// untouched; the commit function must only overwrite this facet's slice.
pub struct Facet<C> {
  /// Scores this facet's slice of the candidate.
  pub fitness: fn(&C) -> Fitness,
  /// Derives a trial candidate whose slice is perturbed against the buddy's.
  pub explore: fn(&C, &C, &mut dyn RngCore) -> C,
  /// Overwrites this facet's slice of the first candidate with the trial's.
  pub commit: fn(&mut C, C),
}

impl<C> Clone for Facet<C> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<C> Copy for Facet<C> {}

/// A candidate advertising `N` facets.
///
/// By convention the *first* facet's fitness is the scalar that drives
/// selection and best tracking in the multi-facet colony.
pub trait Faceted<const N: usize>: Candidate {
  /// The facets of this candidate type, in a fixed order.
  fn facets() -> [Facet<Self>; N];
}
