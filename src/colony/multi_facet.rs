//! A colony over candidates whose state splits into independently
//! perturbable facets.

use log::trace;
use rand::{Rng, RngCore};

use crate::{
  candidate::Faceted,
  colony::{assert_population_size, Colony},
  sampling::{index_except, roulette},
  score::{check_nectar, Fitness, Fitnesses},
};

/// A source of the multi-facet colony, caching one fitness value per facet.
///
/// By convention the first facet's fitness drives proportional selection,
/// champion tracking and the nectar total.
#[derive(Clone, Debug)]
pub struct FacetSource<C: Faceted<N>, const N: usize> {
  /// The candidate this source currently works.
  pub candidate: C,
  /// Cached fitness of each facet.
  pub fitness: Fitnesses<N>,
  /// Remaining patience before forced reinitialization.
  pub limit: u32,
}

impl<C: Faceted<N>, const N: usize> FacetSource<C, N> {
  fn new(limit: u32, candidate: C) -> Self {
    let facets = C::facets();
    let mut fitness = [0.0; N];
    for (cached, facet) in fitness.iter_mut().zip(&facets) {
      *cached = (facet.fitness)(&candidate);
    }
    Self {
      candidate,
      fitness,
      limit,
    }
  }

  /// Explores every facet independently against `buddy`: each facet's trial
  /// is committed iff it strictly improves that facet's own fitness, so one
  /// call may accept some facets and reject others. Any commit restores the
  /// patience budget.
  ///
  /// Returns only the first facet's fitness delta — intentionally, not by
  /// omission: nectar tracks the single scalar driving selection, even
  /// though other facets may have changed too.
  fn explore(&mut self, buddy: &C, limit: u32, rng: &mut dyn RngCore)
    -> Fitness {
    let old_fitness = self.fitness[0];
    for (index, facet) in C::facets().iter().enumerate() {
      let trial = (facet.explore)(&self.candidate, buddy, rng);
      let trial_fitness = (facet.fitness)(&trial);
      if trial_fitness > self.fitness[index] {
        (facet.commit)(&mut self.candidate, trial);
        self.fitness[index] = trial_fitness;
        self.limit = limit;
      }
    }
    self.fitness[0] - old_fitness
  }

  /// Redraws the candidate and rescores every facet. Returns the first
  /// facet's fitness delta for the caller's nectar total.
  fn abandon<R: Rng>(&mut self, limit: u32, rng: &mut R) -> Fitness {
    let fresh = C::generate(self.candidate.params(), rng);
    let old_fitness = self.fitness[0];
    for (cached, facet) in self.fitness.iter_mut().zip(&C::facets()) {
      *cached = (facet.fitness)(&fresh);
    }
    self.candidate = fresh;
    self.limit = limit;
    self.fitness[0] - old_fitness
  }
}

/// A bee colony over a candidate advertising `N` facets, each an
/// independently evaluated and perturbable slice of its state.
pub struct MultiFacetColony<C: Faceted<N>, const N: usize> {
  params: C::Params,
}

impl<C: Faceted<N>, const N: usize> MultiFacetColony<C, N> {
  /// Creates a colony over the target with the given problem parameters.
  pub fn new(params: C::Params) -> Self {
    Self { params }
  }
}

impl<C: Faceted<N>, const N: usize> Colony for MultiFacetColony<C, N> {
  type Champion = FacetSource<C, N>;

  fn clusterize<R: Rng>(
    &self,
    population_size: usize,
    iterations: usize,
    limit: u32,
    rng: &mut R,
  ) -> FacetSource<C, N> {
    assert_population_size(population_size);
    assert!(N > 0, "a faceted candidate must advertise at least one facet");
    let mut sources: Vec<FacetSource<C, N>> = (0..population_size)
      .map(|_| FacetSource::new(limit, C::generate(&self.params, rng)))
      .collect();
    let mut champion = sources
      .iter()
      .max_by(|a, b| a.fitness[0].total_cmp(&b.fitness[0]))
      .expect("population is not empty")
      .clone();
    let mut nectar: Fitness = sources.iter().map(|s| s.fitness[0]).sum();

    for round in 0..iterations {
      for index in 0..sources.len() {
        let buddy = index_except(sources.len(), index, rng);
        let buddy = sources[buddy].candidate.clone();
        nectar += sources[index].explore(&buddy, limit, rng);
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness[0]));

      for _ in 0..sources.len() {
        let index =
          roulette(sources.iter().map(|s| s.fitness[0]), nectar, rng);
        let buddy = index_except(sources.len(), index, rng);
        let buddy = sources[buddy].candidate.clone();
        nectar += sources[index].explore(&buddy, limit, rng);
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness[0]));

      for source in &mut sources {
        if source.fitness[0] > champion.fitness[0] {
          champion = source.clone();
        }
        if source.limit == 0 {
          nectar += source.abandon(limit, rng);
        } else {
          source.limit -= 1;
        }
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness[0]));
      trace!("round {round}: champion fitness {:.6}", champion.fitness[0]);
    }

    champion
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::{
    candidate::{Candidate, Facet},
    goal::{multi::MultiFuzzyClustering, sample_vectors},
  };

  /// A two-facet candidate built so that facet 0 always improves on
  /// exploration while facet 1 never does.
  #[derive(Clone, Debug)]
  struct Lopsided {
    rising: f64,
    stuck: f64,
  }

  impl Candidate for Lopsided {
    type Params = ();

    fn generate<R: Rng>(_: &(), _: &mut R) -> Self {
      Self {
        rising: 1.0,
        stuck: 1.0,
      }
    }

    fn params(&self) -> &() {
      &()
    }
  }

  impl Faceted<2> for Lopsided {
    fn facets() -> [Facet<Self>; 2] {
      [
        Facet {
          fitness: |c| c.rising,
          explore: |c, _, _| Self {
            rising: c.rising + 1.0,
            ..c.clone()
          },
          commit: |c, trial| c.rising = trial.rising,
        },
        Facet {
          fitness: |c| c.stuck,
          explore: |c, _, _| c.clone(),
          commit: |c, trial| c.stuck = trial.stuck,
        },
      ]
    }
  }

  #[test]
  fn test_facets_accept_and_reject_independently() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut source: FacetSource<Lopsided, 2> =
      FacetSource::new(5, Lopsided::generate(&(), &mut rng));
    source.limit = 2;
    let delta = source.explore(&source.candidate.clone(), 5, &mut rng);
    assert_eq!(delta, 1.0, "facet 0 must commit its improvement");
    assert_eq!(source.fitness, [2.0, 1.0], "facet 1 must stay rejected");
    assert_eq!(source.candidate.rising, 2.0);
    assert_eq!(source.candidate.stuck, 1.0);
    assert_eq!(source.limit, 5, "any facet commit restores patience");
  }

  fn colony() -> MultiFacetColony<MultiFuzzyClustering, 2> {
    let vectors = Arc::new(sample_vectors(&mut StdRng::seed_from_u64(31)));
    MultiFacetColony::new(vectors)
  }

  #[test]
  fn test_improves_over_initial_best() {
    let initial = colony().clusterize(6, 0, 10, &mut StdRng::seed_from_u64(3));
    let evolved =
      colony().clusterize(6, 30, 10, &mut StdRng::seed_from_u64(3));
    assert!(evolved.fitness[0] >= initial.fitness[0]);
  }

  #[test]
  fn test_same_seed_reproduces_champion() {
    let first = colony().clusterize(5, 15, 5, &mut StdRng::seed_from_u64(29));
    let second = colony().clusterize(5, 15, 5, &mut StdRng::seed_from_u64(29));
    assert_eq!(first.fitness, second.fitness);
  }

  #[test]
  fn test_tiny_limit_exercises_abandonment() {
    let mut rng = StdRng::seed_from_u64(37);
    colony().clusterize(5, 15, 0, &mut rng);
  }
}
