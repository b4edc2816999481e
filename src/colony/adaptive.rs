//! A colony over a product of sub-objectives, with a per-source trend that
//! steers which sub-objective exploration favors.

use log::trace;
use rand::Rng;

use crate::{
  candidate::AdaptiveObjective,
  colony::{assert_population_size, Colony},
  sampling::{index_except, roulette},
  score::{check_nectar, softmax, Fitness, Fitnesses},
};

/// Weight of the old trend in the exponential moving average applied on
/// every accepted improvement.
const TREND_RETENTION: f64 = 0.9;

/// A source of the adaptive colony: besides the candidate it carries the
/// sub-fitness vector, its product (the scalar fitness driving selection)
/// and the trend vector the disposition is derived from.
#[derive(Clone, Debug)]
pub struct AdaptiveSource<C: AdaptiveObjective<N>, const N: usize> {
  /// The candidate this source currently works.
  pub candidate: C,
  /// Cached per-sub-objective fitness of the candidate.
  pub fitnesses: Fitnesses<N>,
  /// Cached product of the sub-fitness values.
  pub fitness: Fitness,
  /// Exponential moving average of accepted sub-fitness vectors.
  pub trend: [f64; N],
  /// Remaining patience before forced reinitialization.
  pub limit: u32,
}

impl<C: AdaptiveObjective<N>, const N: usize> AdaptiveSource<C, N> {
  fn new(limit: u32, candidate: C) -> Self {
    let fitnesses = candidate.fitnesses();
    Self {
      fitness: fitnesses.iter().product(),
      fitnesses,
      trend: [1.0 / N as f64; N],
      candidate,
      limit,
    }
  }

  /// Explores against `buddy` under the current disposition. On
  /// improvement of the product fitness the candidate, fitness caches and
  /// trend are updated together and the patience budget is restored; on
  /// rejection no state changes at all. Returns the nectar delta.
  fn explore<R: Rng>(&mut self, buddy: &C, limit: u32, rng: &mut R)
    -> Fitness {
    let mut ratios = [0.0; N];
    for ((ratio, fitness), trend) in
      ratios.iter_mut().zip(&self.fitnesses).zip(&self.trend)
    {
      *ratio = fitness / trend;
    }
    let disposition = softmax(ratios)[0];
    let trial = self.candidate.explore(buddy, disposition, rng);
    let trial_fitnesses = trial.fitnesses();
    let trial_fitness: Fitness = trial_fitnesses.iter().product();
    if trial_fitness > self.fitness {
      let delta = trial_fitness - self.fitness;
      for (trend, fitness) in self.trend.iter_mut().zip(&trial_fitnesses) {
        *trend = TREND_RETENTION * *trend + (1.0 - TREND_RETENTION) * fitness;
      }
      self.candidate = trial;
      self.fitnesses = trial_fitnesses;
      self.fitness = trial_fitness;
      self.limit = limit;
      delta
    } else {
      0.0
    }
  }

  /// Redraws the candidate, recomputes the fitness caches from the fresh
  /// candidate and resets the trend to a uniform distribution over the
  /// sub-objectives. Returns the product-fitness delta for the caller's
  /// nectar total.
  fn abandon<R: Rng>(&mut self, limit: u32, rng: &mut R) -> Fitness {
    let fresh = C::generate(self.candidate.params(), rng);
    let old_fitness = self.fitness;
    self.fitnesses = fresh.fitnesses();
    self.fitness = self.fitnesses.iter().product();
    self.trend = [1.0 / N as f64; N];
    self.candidate = fresh;
    self.limit = limit;
    self.fitness - old_fitness
  }
}

/// A bee colony over a candidate with `N` sub-objectives, whose overall
/// fitness is their product.
///
/// Each source keeps a trend vector tracking the sub-fitness profile of its
/// accepted improvements; a softmax of the current sub-fitness values over
/// that trend yields the disposition scalar handed to the candidate's
/// `explore`, which uses it to pick the sub-objective to perturb.
pub struct AdaptiveColony<C: AdaptiveObjective<N>, const N: usize> {
  params: C::Params,
}

impl<C: AdaptiveObjective<N>, const N: usize> AdaptiveColony<C, N> {
  /// Creates a colony over the target with the given problem parameters.
  pub fn new(params: C::Params) -> Self {
    Self { params }
  }
}

impl<C: AdaptiveObjective<N>, const N: usize> Colony for AdaptiveColony<C, N> {
  type Champion = AdaptiveSource<C, N>;

  fn clusterize<R: Rng>(
    &self,
    population_size: usize,
    iterations: usize,
    limit: u32,
    rng: &mut R,
  ) -> AdaptiveSource<C, N> {
    assert_population_size(population_size);
    let mut sources: Vec<AdaptiveSource<C, N>> = (0..population_size)
      .map(|_| AdaptiveSource::new(limit, C::generate(&self.params, rng)))
      .collect();
    let mut champion = sources
      .iter()
      .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
      .expect("population is not empty")
      .clone();
    let mut nectar: Fitness = sources.iter().map(|s| s.fitness).sum();

    for round in 0..iterations {
      for index in 0..sources.len() {
        let buddy = index_except(sources.len(), index, rng);
        let buddy = sources[buddy].candidate.clone();
        nectar += sources[index].explore(&buddy, limit, rng);
      }
      check_nectar(nectar, sources.iter().map(|s| s.fitness));

      for _ in 0..sources.len() {
        let index =
          roulette(sources.iter().map(|s| s.fitness), nectar, rng);
        let buddy = index_except(sources.len(), index, rng);
        let buddy = sources[buddy].candidate.clone();
        nectar += sources[index].explore(&buddy, limit, rng);
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
      trace!("round {round}: champion fitness {:.6e}", champion.fitness);
    }

    champion
  }
}
