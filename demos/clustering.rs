use std::sync::Arc;

use apiary::{
  colony::{
    adaptive::AdaptiveColony,
    global_local::GlobalLocalColony,
    modified::ModifiedColony,
    multi_facet::MultiFacetColony,
    simple::SimpleColony,
    Colony,
  },
  goal::{
    adaptive::AdaptiveFuzzyClustering,
    fuzzy::FuzzyClustering,
    global_local::GlobalLocalFuzzyClustering,
    modified::{ModifiedFuzzyClustering, ModifiedFuzzyParams},
    multi::MultiFuzzyClustering,
    nearest_neighbors,
    sample_vectors,
    NeighborParams,
  },
};
use rand::{rngs::StdRng, SeedableRng};

const POPULATION: usize = 20;
const ITERATIONS: usize = 500;
const LIMIT: u32 = 25;

fn main() {
  env_logger::init();
  let mut rng = StdRng::seed_from_u64(2024);

  // four gaussian blobs of 2D points; every colony clusters the same data
  let vectors = Arc::new(sample_vectors(&mut rng));
  let neighbors = Arc::new(nearest_neighbors(&vectors, 5));

  let simple = SimpleColony::<FuzzyClustering>::new(Arc::clone(&vectors));
  let champion = simple.clusterize(POPULATION, ITERATIONS, LIMIT, &mut rng);
  println!("simple colony:       fitness {:.6}", champion.fitness);

  let modified = ModifiedColony::<ModifiedFuzzyClustering>::new(
    ModifiedFuzzyParams::builder()
      .vectors(Arc::clone(&vectors))
      .f(0.5)
      .mr(0.4)
      .build(),
  );
  let champion = modified.clusterize(POPULATION, ITERATIONS, LIMIT, &mut rng);
  println!("modified colony:     fitness {:.6}", champion.fitness);

  let adaptive =
    AdaptiveColony::<AdaptiveFuzzyClustering, 2>::new(Arc::clone(&vectors));
  let champion = adaptive.clusterize(POPULATION, ITERATIONS, LIMIT, &mut rng);
  println!(
    "adaptive colony:     fitness {:.6e} (sub-fitnesses {:.6?})",
    champion.fitness, champion.fitnesses
  );

  let global_local = GlobalLocalColony::<GlobalLocalFuzzyClustering>::new(
    NeighborParams::builder()
      .vectors(Arc::clone(&vectors))
      .neighbors(Arc::clone(&neighbors))
      .build(),
  );
  let (global, local) =
    global_local.clusterize(POPULATION, ITERATIONS, LIMIT, &mut rng);
  println!(
    "global-local colony: global fitness {:.6}, local fitness {:.6}",
    global.global_fitness, local.local_fitness
  );

  let multi =
    MultiFacetColony::<MultiFuzzyClustering, 2>::new(Arc::clone(&vectors));
  let champion = multi.clusterize(POPULATION, ITERATIONS, LIMIT, &mut rng);
  println!(
    "multi-facet colony:  facet fitnesses {:.6?}",
    champion.fitness
  );
}
