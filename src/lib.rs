//! **Apiary** is a family of artificial bee colony optimizers. It strives to
//! be simple, deterministic under a seeded generator, and highly focused on
//! plugging in your own optimization targets with a handful of traits.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! The artificial bee colony metaphor splits one round of optimization into
//! three phases played over a population of **sources** - candidate
//! solutions paired with a fitness cache and a patience counter:
//! 1. **Employed** bees visit every source once and try to improve it
//!    against a random *buddy* source
//! 2. **Onlooker** bees repeat the same move, but pick which sources to
//!    revisit with probability proportional to fitness, concentrating
//!    effort on the promising ones
//! 3. **Scouts** abandon any source whose patience ran out - it is replaced
//!    with a freshly drawn candidate - after the best source of the round
//!    was recorded as the colony's champion
//!
//! Improvements are always greedy: a trial candidate replaces its source
//! only when its fitness is strictly higher, and doing so refills the
//! source's patience. The sum of all cached fitness values (the *nectar* of
//! the colony) is maintained incrementally and drives the onlookers'
//! proportional selection.
//!
//! # Colonies
//!
//! Every colony implements the [`Colony`] trait and differs in what it
//! demands of a candidate and how it plays the three phases:
//!
//! | Colony                                       | Candidate contract        | Twist                                                        |
//! |:---------------------------------------------|:--------------------------|:-------------------------------------------------------------|
//! | [`SimpleColony`](colony::simple)             | [`Explore`]               | the textbook algorithm                                       |
//! | [`ModifiedColony`](colony::modified)         | [`DifferentialExplore`]   | trial moves blend the champion and three distinct peers      |
//! | [`AdaptiveColony`](colony::adaptive)         | [`AdaptiveObjective`]     | a per-source trend steers which sub-objective gets perturbed |
//! | [`GlobalLocalColony`](colony::global_local)  | [`DualObjective`]         | anneals from a local objective to a global one over the run  |
//! | [`MultiFacetColony`](colony::multi_facet)    | [`Faceted`]               | independent greedy acceptance per candidate facet            |
//!
//! # Targets
//!
//! A target plugs in by implementing [`Candidate`] plus the capability trait
//! of the colony you want to run. The [`goal`] module ships ready targets -
//! crisp and fuzzy clusterings of 2D points, plus scalar toys - that double
//! as templates; none of them is special to the drivers.
//!
//! # Determinism
//!
//! Every entry point takes the random generator as an argument and draws
//! all of its randomness from it, so a seeded [`StdRng`] reproduces a run
//! exactly. Runs are strictly single-threaded; there is no parallelism to
//! perturb the draw order.
//!
//! # Example
//!
//! Find the meaning of life with the simplest colony:
//!
//! ```
//! use apiary::{
//!   colony::{simple::SimpleColony, Colony},
//!   goal::meaning::MeaningOfLife,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let colony = SimpleColony::<MeaningOfLife>::new(42.0);
//! let champion = colony.clusterize(10, 200, 20, &mut rng);
//! assert!((champion.candidate.value() - 42.0).abs() < 1.0);
//! ```
//!
//! [`Colony`]: crate::colony::Colony
//! [`Candidate`]: crate::candidate::Candidate
//! [`Explore`]: crate::candidate::Explore
//! [`DifferentialExplore`]: crate::candidate::DifferentialExplore
//! [`AdaptiveObjective`]: crate::candidate::AdaptiveObjective
//! [`DualObjective`]: crate::candidate::DualObjective
//! [`Faceted`]: crate::candidate::Faceted
//! [`StdRng`]: rand::rngs::StdRng

#![warn(missing_docs)]

pub mod candidate;
pub mod colony;
pub mod goal;
pub mod sampling;
pub mod score;
pub mod source;
