//! A DE/ABC hybrid colony: exploration steers toward the best-known source.

use log::trace;
use rand::Rng;

use crate::{
  candidate::DifferentialExplore,
  colony::{assert_population_size, Colony},
  sampling::{distinct_indices_except, roulette},
  score::{check_nectar, Fitness},
  source::Source,
};

/// A bee colony whose exploration is a differential-evolution style mix of
/// four informants: the champion, a buddy and two more random distinct
/// sources.
///
/// The champion copy is *read* by every employed- and onlooker-bee call but
/// only *updated* once per round, in the scout phase, so within a round all
/// explorations steer toward the same snapshot of the best-known source.
pub struct ModifiedColony<C: DifferentialExplore> {
  params: C::Params,
}

impl<C: DifferentialExplore> ModifiedColony<C> {
  /// Creates a colony over the target with the given problem parameters.
  pub fn new(params: C::Params) -> Self {
    Self { params }
  }
}

impl<C: DifferentialExplore> Colony for ModifiedColony<C> {
  type Champion = Source<C>;

  fn clusterize<R: Rng>(
    &self,
    population_size: usize,
    iterations: usize,
    limit: u32,
    rng: &mut R,
  ) -> Source<C> {
    assert_population_size(population_size);
    assert!(
      population_size >= 4,
      "differential exploration needs three informants besides the source, \
       got a population of {population_size}"
    );
    let mut sources: Vec<Source<C>> = (0..population_size)
      .map(|_| Source::new(limit, C::generate(&self.params, rng)))
      .collect();
    let mut champion = sources
      .iter()
      .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
      .expect("population is not empty")
      .clone();
    let mut nectar: Fitness = sources.iter().map(|s| s.fitness).sum();

    for round in 0..iterations {
      for index in 0..sources.len() {
        nectar += explore_source(&mut sources, index, &champion, limit, rng);
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness));

      for _ in 0..sources.len() {
        let index =
          roulette(sources.iter().map(|s| s.fitness), nectar, rng);
        nectar += explore_source(&mut sources, index, &champion, limit, rng);
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness));

      for source in &mut sources {
        if source.fitness > champion.fitness {
          champion = source.clone();
        }
        if source.limit == 0 {
          nectar += source.abandon(limit, rng);
        } else {
          source.limit -= 1;
        }
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness));
      trace!("round {round}: champion fitness {:.6}", champion.fitness);
    }

    champion
  }
}

/// Explores the source at `index` against the champion and three random
/// distinct informants, greedily adopting the trial candidate. Returns the
/// nectar delta.
fn explore_source<C: DifferentialExplore, R: Rng>(
  sources: &mut [Source<C>],
  index: usize,
  champion: &Source<C>,
  limit: u32,
  rng: &mut R,
) -> Fitness {
  let informants = distinct_indices_except(sources.len(), 3, index, rng);
  let trial = sources[index].candidate.explore(
    &champion.candidate,
    &sources[informants[0]].candidate,
    &sources[informants[1]].candidate,
    &sources[informants[2]].candidate,
    rng,
  );
  let trial_fitness = trial.fitness();
  let source = &mut sources[index];
  if trial_fitness > source.fitness {
    let delta = trial_fitness - source.fitness;
    source.adopt(trial, trial_fitness, limit);
    delta
  } else {
    0.0
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::{modified::ModifiedFuzzyClustering, sample_vectors};

  fn colony() -> ModifiedColony<ModifiedFuzzyClustering> {
    let params = crate::goal::modified::ModifiedFuzzyParams::builder()
      .vectors(Arc::new(sample_vectors(&mut StdRng::seed_from_u64(99))))
      .f(0.5)
      .mr(0.4)
      .build();
    ModifiedColony::new(params)
  }

  #[test]
  fn test_improves_over_initial_best() {
    let initial = colony().clusterize(6, 0, 10, &mut StdRng::seed_from_u64(1));
    let evolved =
      colony().clusterize(6, 30, 10, &mut StdRng::seed_from_u64(1));
    assert!(evolved.fitness > initial.fitness);
  }

  #[test]
  fn test_same_seed_reproduces_champion() {
    let first = colony().clusterize(6, 20, 5, &mut StdRng::seed_from_u64(8));
    let second = colony().clusterize(6, 20, 5, &mut StdRng::seed_from_u64(8));
    assert_eq!(first.fitness, second.fitness);
  }

  #[test]
  fn test_tiny_limit_exercises_abandonment() {
    let mut rng = StdRng::seed_from_u64(5);
    colony().clusterize(5, 15, 0, &mut rng);
  }

  #[test]
  #[should_panic(expected = "three informants")]
  fn test_rejects_population_of_three() {
    let mut rng = StdRng::seed_from_u64(0);
    colony().clusterize(3, 10, 5, &mut rng);
  }
}
