//! A dual-objective colony annealing from local to global search.

use log::trace;
use rand::Rng;

use crate::{
  candidate::DualObjective,
  colony::{assert_population_size, Colony},
  sampling::{index_except, roulette},
  score::{check_nectar, Fitness},
};

/// The objective a round is played under.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
  Global,
  Local,
}

/// A source of the global-local colony, caching both fitness values.
#[derive(Clone, Debug)]
pub struct DualSource<C: DualObjective> {
  /// The candidate this source currently works.
  pub candidate: C,
  /// Cached global fitness of the candidate.
  pub global_fitness: Fitness,
  /// Cached local fitness of the candidate.
  pub local_fitness: Fitness,
  /// Remaining patience before forced reinitialization.
  pub limit: u32,
}

impl<C: DualObjective> DualSource<C> {
  fn new(limit: u32, candidate: C) -> Self {
    Self {
      global_fitness: candidate.global_fitness(),
      local_fitness: candidate.local_fitness(),
      candidate,
      limit,
    }
  }

  /// Accepts `trial` as the new candidate: takes the already evaluated
  /// primary fitness, evaluates the other one (a candidate change generally
  /// perturbs both) and restores the patience budget. Returns the
  /// (global, local) fitness deltas.
  fn adopt(
    &mut self,
    trial: C,
    phase: Phase,
    primary: Fitness,
    limit: u32,
  ) -> (Fitness, Fitness) {
    let (global, local) = match phase {
      Phase::Global => (primary, trial.local_fitness()),
      Phase::Local => (trial.global_fitness(), primary),
    };
    let deltas = (global - self.global_fitness, local - self.local_fitness);
    self.candidate = trial;
    self.global_fitness = global;
    self.local_fitness = local;
    self.limit = limit;
    deltas
  }

  /// Redraws the candidate and recomputes both fitness caches. Returns the
  /// (global, local) fitness deltas for the caller's nectar totals.
  fn abandon<R: Rng>(&mut self, limit: u32, rng: &mut R) -> (Fitness, Fitness) {
    let fresh = C::generate(self.candidate.params(), rng);
    let global = fresh.global_fitness();
    let local = fresh.local_fitness();
    let deltas =
      (global - self.global_fitness, local - self.local_fitness);
    self.candidate = fresh;
    self.global_fitness = global;
    self.local_fitness = local;
    self.limit = limit;
    deltas
  }

  fn primary_fitness(&self, phase: Phase) -> Fitness {
    match phase {
      Phase::Global => self.global_fitness,
      Phase::Local => self.local_fitness,
    }
  }
}

/// A bee colony tracking two independent objectives at once.
///
/// Every round is played entirely in one phase, drawn with
/// `P(global) = round / iterations`: early rounds almost always refine the
/// local objective, late rounds the global one — a fixed annealing
/// schedule, not adaptive to fitness. Acceptance, proportional selection
/// and champion tracking all follow the phase's fitness; both nectar totals
/// are kept consistent throughout because every accepted candidate change
/// perturbs both fitness values.
pub struct GlobalLocalColony<C: DualObjective> {
  params: C::Params,
}

impl<C: DualObjective> GlobalLocalColony<C> {
  /// Creates a colony over the target with the given problem parameters.
  pub fn new(params: C::Params) -> Self {
    Self { params }
  }
}

impl<C: DualObjective> Colony for GlobalLocalColony<C> {
  /// The best source seen in a global-phase round and the best seen in a
  /// local-phase round, in that order.
  type Champion = (DualSource<C>, DualSource<C>);

  fn clusterize<R: Rng>(
    &self,
    population_size: usize,
    iterations: usize,
    limit: u32,
    rng: &mut R,
  ) -> (DualSource<C>, DualSource<C>) {
    assert_population_size(population_size);
    let mut sources: Vec<DualSource<C>> = (0..population_size)
      .map(|_| DualSource::new(limit, C::generate(&self.params, rng)))
      .collect();
    let mut global_champion = sources
      .iter()
      .max_by(|a, b| a.global_fitness.total_cmp(&b.global_fitness))
      .expect("population is not empty")
      .clone();
    let mut local_champion = sources
      .iter()
      .max_by(|a, b| a.local_fitness.total_cmp(&b.local_fitness))
      .expect("population is not empty")
      .clone();
    let mut global_nectar: Fitness =
      sources.iter().map(|s| s.global_fitness).sum();
    let mut local_nectar: Fitness =
      sources.iter().map(|s| s.local_fitness).sum();

    for round in 0..iterations {
      let phase = if rng.gen_bool(round as f64 / iterations as f64) {
        Phase::Global
      } else {
        Phase::Local
      };

      for index in 0..sources.len() {
        let (global_delta, local_delta) =
          explore_source(&mut sources, index, phase, limit, rng);
        global_nectar += global_delta;
        local_nectar += local_delta;
      }
      check_nectar(global_nectar, sources.iter().map(|s| s.global_fitness));
      check_nectar(local_nectar, sources.iter().map(|s| s.local_fitness));

      for _ in 0..sources.len() {
        let nectar = match phase {
          Phase::Global => global_nectar,
          Phase::Local => local_nectar,
        };
        let index = roulette(
          sources.iter().map(|s| s.primary_fitness(phase)),
          nectar,
          rng,
        );
        let (global_delta, local_delta) =
          explore_source(&mut sources, index, phase, limit, rng);
        global_nectar += global_delta;
        local_nectar += local_delta;
      }
      check_nectar(global_nectar, sources.iter().map(|s| s.global_fitness));
      check_nectar(local_nectar, sources.iter().map(|s| s.local_fitness));

      for source in &mut sources {
        match phase {
          Phase::Global => {
            if source.global_fitness > global_champion.global_fitness {
              global_champion = source.clone();
            }
          }
          Phase::Local => {
            if source.local_fitness > local_champion.local_fitness {
              local_champion = source.clone();
            }
          }
        }
        if source.limit == 0 {
          let (global_delta, local_delta) = source.abandon(limit, rng);
          global_nectar += global_delta;
          local_nectar += local_delta;
        } else {
          source.limit -= 1;
        }
      }
      check_nectar(global_nectar, sources.iter().map(|s| s.global_fitness));
      check_nectar(local_nectar, sources.iter().map(|s| s.local_fitness));
      trace!(
        "round {round} ({phase:?}): global champion {:.6}, local champion {:.6}",
        global_champion.global_fitness,
        local_champion.local_fitness
      );
    }

    (global_champion, local_champion)
  }
}

/// Explores the source at `index` against a random buddy. The acceptance
/// test runs on the phase's primary fitness only; on acceptance both
/// cached fitness values are recomputed. Returns the (global, local)
/// nectar deltas.
fn explore_source<C: DualObjective, R: Rng>(
  sources: &mut [DualSource<C>],
  index: usize,
  phase: Phase,
  limit: u32,
  rng: &mut R,
) -> (Fitness, Fitness) {
  let buddy = index_except(sources.len(), index, rng);
  let trial = sources[index].candidate.explore(&sources[buddy].candidate, rng);
  let source = &mut sources[index];
  let primary = match phase {
    Phase::Global => trial.global_fitness(),
    Phase::Local => trial.local_fitness(),
  };
  if primary > source.primary_fitness(phase) {
    source.adopt(trial, phase, primary, limit)
  } else {
    (0.0, 0.0)
  }
}
