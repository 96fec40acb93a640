//! Scores every candidate and orders them best first.

use crate::candidate::PrimerCandidate;
use crate::error::PrimerError;
use crate::scoring::{Penalty, ScoringConfig, penalties, total};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: PrimerCandidate,
    pub score: i64,
    pub penalties: Vec<Penalty>,
}

impl ScoredCandidate {
    pub fn new(candidate: PrimerCandidate, config: &ScoringConfig) -> Result<Self, PrimerError> {
        let penalties = penalties(&candidate, config)?;
        let score = total(config, &penalties);
        Ok(Self {
            candidate,
            score,
            penalties,
        })
    }
}

/// Scores all candidates (in parallel) and sorts them by descending score.
/// Candidates with equal scores keep their input order.
///
/// Any candidate that cannot be scored fails the whole ranking.
pub fn rank_with(
    candidates: &[PrimerCandidate],
    config: &ScoringConfig,
) -> Result<Vec<ScoredCandidate>, PrimerError> {
    let mut scored = candidates
        .par_iter()
        .map(|c| {
            ScoredCandidate::new(c.clone(), config).map_err(|e| {
                PrimerError::new(e.code, format!("Candidate '{}': {}", c.gene, e.message))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    // stable, so ties stay in input order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(scored)
}

pub fn rank(candidates: &[PrimerCandidate]) -> Result<Vec<ScoredCandidate>, PrimerError> {
    rank_with(candidates, &ScoringConfig::default())
}

/// The top-ranked candidate. Fails on an empty collection.
pub fn best_with(
    candidates: &[PrimerCandidate],
    config: &ScoringConfig,
) -> Result<ScoredCandidate, PrimerError> {
    rank_with(candidates, config)?
        .into_iter()
        .next()
        .ok_or_else(PrimerError::empty_input)
}

pub fn best(candidates: &[PrimerCandidate]) -> Result<ScoredCandidate, PrimerError> {
    best_with(candidates, &ScoringConfig::default())
}
