pub mod candidate;
pub mod dimer;
pub mod error;
pub mod genome_stats;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod sequence_metrics;

pub use candidate::PrimerCandidate;
pub use error::{ErrorCode, PrimerError};
pub use ranking::{ScoredCandidate, best, rank};
pub use scoring::{ScoringConfig, score};
