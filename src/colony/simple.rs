//! The canonical artificial bee colony over a scalar objective.

use log::trace;
use rand::Rng;

use crate::{
  candidate::Explore,
  colony::{assert_population_size, Colony},
  sampling::{index_except, roulette},
  score::{check_nectar, Fitness},
  source::Source,
};

/// The canonical bee colony: single scalar fitness, pairwise exploration,
/// strictly greedy replacement.
pub struct SimpleColony<C: Explore> {
  params: C::Params,
}

impl<C: Explore> SimpleColony<C> {
  /// Creates a colony over the target with the given problem parameters.
  pub fn new(params: C::Params) -> Self {
    Self { params }
  }
}

impl<C: Explore> Colony for SimpleColony<C> {
  type Champion = Source<C>;

  fn clusterize<R: Rng>(
    &self,
    population_size: usize,
    iterations: usize,
    limit: u32,
    rng: &mut R,
  ) -> Source<C> {
    assert_population_size(population_size);
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
        nectar += explore_source(&mut sources, index, limit, rng);
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness));

      for _ in 0..sources.len() {
        let index =
          roulette(sources.iter().map(|s| s.fitness), nectar, rng);
        nectar += explore_source(&mut sources, index, limit, rng);
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

/// Explores the source at `index` against a random buddy and greedily
/// adopts the trial candidate. Returns the nectar delta: the fitness gain
/// on acceptance, zero on rejection.
fn explore_source<C: Explore, R: Rng>(
  sources: &mut [Source<C>],
  index: usize,
  limit: u32,
  rng: &mut R,
) -> Fitness {
  let buddy = index_except(sources.len(), index, rng);
  let trial = sources[index].candidate.explore(&sources[buddy].candidate, rng);
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
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::goal::meaning::MeaningOfLife;

  fn colony() -> SimpleColony<MeaningOfLife> {
    SimpleColony::new(42.0)
  }

  #[test]
  fn test_converges_on_meaning_of_life() {
    let mut rng = StdRng::seed_from_u64(42);
    let champion = colony().clusterize(10, 200, 20, &mut rng);
    assert!(
      (champion.candidate.value() - 42.0).abs() < 1.0,
      "champion value {} too far from 42",
      champion.candidate.value()
    );
  }

  #[test]
  fn test_champion_never_regresses_from_initial_best() {
    // under the same seed both runs draw the same initial population
    let initial = colony().clusterize(10, 0, 20, &mut StdRng::seed_from_u64(7));
    let evolved =
      colony().clusterize(10, 200, 20, &mut StdRng::seed_from_u64(7));
    assert!(evolved.fitness > initial.fitness);
  }

  #[test]
  fn test_same_seed_reproduces_champion() {
    let first = colony().clusterize(8, 50, 10, &mut StdRng::seed_from_u64(3));
    let second = colony().clusterize(8, 50, 10, &mut StdRng::seed_from_u64(3));
    assert_eq!(first.candidate.value(), second.candidate.value());
    assert_eq!(first.fitness, second.fitness);
  }

  #[test]
  fn test_tiny_limit_exercises_abandonment() {
    // limit 0 forces scouts every round; the nectar checks inside
    // `clusterize` verify the abandonment bookkeeping
    let mut rng = StdRng::seed_from_u64(13);
    colony().clusterize(5, 30, 0, &mut rng);
  }

  #[test]
  #[should_panic(expected = "at least two sources")]
  fn test_rejects_population_of_one() {
    let mut rng = StdRng::seed_from_u64(0);
    colony().clusterize(1, 10, 5, &mut rng);
  }
}
