//! Toy scalar targets: guess a number (or a vector of numbers).

use itertools::izip;
use rand::Rng;

use crate::{
  candidate::{Candidate, Explore, Objective},
  score::Fitness,
};

/// Guesses a single scalar; fitness is the reciprocal distance to the
/// target. Handy for smoke-testing a colony.
#[derive(Clone, Debug)]
pub struct MeaningOfLife {
  value: f64,
  target: f64,
}

impl MeaningOfLife {
  /// The current guess.
  pub fn value(&self) -> f64 {
    self.value
  }
}

impl Candidate for MeaningOfLife {
  type Params = f64;

  fn generate<R: Rng>(target: &f64, rng: &mut R) -> Self {
    Self {
      value: rng.gen::<f64>() * 500.0,
      target: *target,
    }
  }

  fn params(&self) -> &f64 {
    &self.target
  }
}

impl Objective for MeaningOfLife {
  fn fitness(&self) -> Fitness {
    // clamped so a dead-on guess still yields a finite fitness
    1.0 / (self.target - self.value).abs().max(f64::EPSILON)
  }
}

impl Explore for MeaningOfLife {
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    let phi = rng.gen_range(-1.0..1.0);
    Self {
      value: self.value + phi * (self.value - buddy.value),
      target: self.target,
    }
  }
}

/// Guesses a vector of scalars; fitness is the reciprocal Euclidean
/// distance to the target vector.
#[derive(Clone, Debug)]
pub struct MeaningsOfLife {
  values: Vec<f64>,
  targets: Vec<f64>,
}

impl MeaningsOfLife {
  /// The current guesses.
  pub fn values(&self) -> &[f64] {
    &self.values
  }
}

impl Candidate for MeaningsOfLife {
  type Params = Vec<f64>;

  fn generate<R: Rng>(targets: &Vec<f64>, rng: &mut R) -> Self {
    Self {
      values: (0..targets.len()).map(|_| rng.gen::<f64>() * 500.0).collect(),
      targets: targets.clone(),
    }
  }

  fn params(&self) -> &Vec<f64> {
    &self.targets
  }
}

impl Objective for MeaningsOfLife {
  fn fitness(&self) -> Fitness {
    let distance = izip!(&self.targets, &self.values)
      .map(|(target, value)| (target - value) * (target - value))
      .sum::<f64>()
      .sqrt();
    1.0 / distance.max(f64::EPSILON)
  }
}

impl Explore for MeaningsOfLife {
  fn explore<R: Rng>(&self, buddy: &Self, rng: &mut R) -> Self {
    let phi = rng.gen_range(-1.0..1.0);
    Self {
      values: izip!(&self.values, &buddy.values)
        .map(|(own, other)| own + phi * (own - other))
        .collect(),
      targets: self.targets.clone(),
    }
  }
}
