//! The colony drivers: five variants of the artificial bee colony cycle.
//!
//! Every variant runs the same three-phase iteration over a fixed-size
//! population of sources:
//! 1. **employed-bee phase** — every source explores against a uniformly
//!    random buddy other than itself;
//! 2. **onlooker-bee phase** — `population_size` fitness-proportional draws
//!    concentrate extra exploration on currently good sources, with the
//!    selection weights recomputed on every draw;
//! 3. **scout phase** — the champion copy is updated, then patience
//!    countdowns run and exhausted sources are reinitialized at random.
//!
//! What differs per variant is the acceptance rule, the shape of the cached
//! fitness state and the nectar bookkeeping; see each submodule. All runs
//! are single-threaded and strictly sequential: the onlooker phase must
//! observe the exact post-employed-phase population state.

pub mod adaptive;
pub mod global_local;
pub mod modified;
pub mod multi_facet;
pub mod simple;

use rand::Rng;

/// Represents an abstract bee colony over some optimization target.
///
/// A colony is constructed once with the target's fixed problem parameters
/// and can then be run any number of times; each run draws its own
/// population from the explicit random generator, so seeded runs are
/// bit-reproducible.
pub trait Colony {
  /// The best source(s) found by a run: a single source copy for most
  /// variants, a pair for the global-local one.
  type Champion;

  /// Runs the full colony cycle for `iterations` rounds over a population
  /// of `population_size` sources, each with a patience budget of `limit`
  /// rounds, and returns independently owned copies of the best source(s)
  /// seen.
  ///
  /// # Panics
  ///
  /// Panics if `population_size < 2`: picking an exploration buddy requires
  /// at least one other source.
  fn clusterize<R: Rng>(
    &self,
    population_size: usize,
    iterations: usize,
    limit: u32,
    rng: &mut R,
  ) -> Self::Champion;
}

pub(crate) fn assert_population_size(population_size: usize) {
  assert!(
    population_size >= 2,
    "population must hold at least two sources, got {population_size}"
  );
}
