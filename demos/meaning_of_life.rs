use apiary::{
  colony::{simple::SimpleColony, Colony},
  goal::meaning::{MeaningOfLife, MeaningsOfLife},
};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
  env_logger::init();
  let mut rng = StdRng::seed_from_u64(42);

  // guess a single number
  let colony = SimpleColony::<MeaningOfLife>::new(42.0);
  let champion = colony.clusterize(10, 200, 20, &mut rng);
  println!(
    "meaning of life: {:.4} (fitness {:.2})",
    champion.candidate.value(),
    champion.fitness
  );

  // ...and a whole vector of them
  let colony = SimpleColony::<MeaningsOfLife>::new(vec![4.0, 8.0, 15.0, 16.0]);
  let champion = colony.clusterize(20, 2000, 30, &mut rng);
  println!(
    "meanings of life: {:?} (fitness {:.2})",
    champion
      .candidate
      .values()
      .iter()
      .map(|v| (v * 100.0).round() / 100.0)
      .collect::<Vec<_>>(),
    champion.fitness
  );
}
