pub mod builder;
pub mod caching_challenge;
pub mod challenge;
pub mod engine;
pub mod history;
pub mod launcher;
pub mod options;
pub mod population;

pub use challenge::Challenge;
pub use engine::{EvolutionEngine, GenerationOutcome};
pub use history::{FitnessHistory, GenerationStats, RecordReason, RecordedIndividual};
pub use launcher::{RunController, RunReport, RunState};
pub use options::{CacheType, EvolutionOptions, EvolutionOptionsBuilder};
pub use population::Population;
