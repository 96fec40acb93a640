//! Heuristic primer-pair score: a base score minus independent penalties.
//!
//! Every rule looks only at the raw candidate fields, never at the running
//! score or at other candidates, so the penalties are additive and the
//! order in [`PenaltyRule::ALL`] only affects reporting.

use crate::candidate::PrimerCandidate;
use crate::dimer::{DIMER_WINDOW, dimer_risk_with_window};
use crate::error::{ErrorCode, PrimerError};
use crate::sequence_metrics::{gc_content, has_long_repeat};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: i64,
    pub tm_delta_severe: f64,
    pub tm_delta_mild: f64,
    pub tm_penalty_severe: i64,
    pub tm_penalty_mild: i64,
    pub gc_hard_min: f64,
    pub gc_hard_max: f64,
    pub gc_soft_min: f64,
    pub gc_soft_max: f64,
    pub gc_penalty_hard: i64,
    pub gc_penalty_soft: i64,
    pub repeat_penalty: i64,
    pub dimer_window: usize,
    pub dimer_penalty: i64,
    pub amplicon_min: usize,
    pub amplicon_max: usize,
    pub amplicon_penalty: i64,
    pub amplicon_oversize: usize,
    pub amplicon_oversize_penalty: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            tm_delta_severe: 5.0,
            tm_delta_mild: 3.0,
            tm_penalty_severe: 25,
            tm_penalty_mild: 10,
            gc_hard_min: 35.0,
            gc_hard_max: 70.0,
            gc_soft_min: 40.0,
            gc_soft_max: 60.0,
            gc_penalty_hard: 15,
            gc_penalty_soft: 5,
            repeat_penalty: 10,
            dimer_window: DIMER_WINDOW,
            dimer_penalty: 15,
            amplicon_min: 120,
            amplicon_max: 300,
            amplicon_penalty: 20,
            amplicon_oversize: 1000,
            amplicon_oversize_penalty: 40,
        }
    }
}

impl ScoringConfig {
    /// Reads a JSON config; keys missing from the file keep their defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PrimerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PrimerError::new(
                ErrorCode::Io,
                format!("Could not read scoring config '{}': {e}", path.display()),
            )
        })?;
        serde_json::from_str(&text).map_err(|e| {
            PrimerError::new(
                ErrorCode::Parse,
                format!("Could not parse scoring config '{}': {e}", path.display()),
            )
        })
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), PrimerError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| {
            PrimerError::new(
                ErrorCode::Io,
                format!("Could not write scoring config '{}': {e}", path.display()),
            )
        })
    }

    fn gc_is_hard_violation(&self, gc: f64) -> bool {
        gc < self.gc_hard_min || gc > self.gc_hard_max
    }

    fn gc_is_soft_violation(&self, gc: f64) -> bool {
        !self.gc_is_hard_violation(gc) && (gc < self.gc_soft_min || gc > self.gc_soft_max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenaltyRule {
    TmDeltaSevere,
    TmDeltaMild,
    ForwardGcHard,
    ForwardGcSoft,
    ReverseGcHard,
    ReverseGcSoft,
    ForwardRepeat,
    ReverseRepeat,
    Dimer,
    AmpliconOutOfRange,
    AmpliconOversize,
}

impl PenaltyRule {
    pub const ALL: [PenaltyRule; 11] = [
        PenaltyRule::TmDeltaSevere,
        PenaltyRule::TmDeltaMild,
        PenaltyRule::ForwardGcHard,
        PenaltyRule::ForwardGcSoft,
        PenaltyRule::ReverseGcHard,
        PenaltyRule::ReverseGcSoft,
        PenaltyRule::ForwardRepeat,
        PenaltyRule::ReverseRepeat,
        PenaltyRule::Dimer,
        PenaltyRule::AmpliconOutOfRange,
        PenaltyRule::AmpliconOversize,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Self::TmDeltaSevere => "melting temperatures differ strongly",
            Self::TmDeltaMild => "melting temperatures differ",
            Self::ForwardGcHard => "forward GC% far outside ideal range",
            Self::ForwardGcSoft => "forward GC% outside ideal range",
            Self::ReverseGcHard => "reverse GC% far outside ideal range",
            Self::ReverseGcSoft => "reverse GC% outside ideal range",
            Self::ForwardRepeat => "forward primer has a homopolymer run",
            Self::ReverseRepeat => "reverse primer has a homopolymer run",
            Self::Dimer => "primers may form a dimer",
            Self::AmpliconOutOfRange => "amplicon size outside diagnostic range",
            Self::AmpliconOversize => "amplicon too large",
        }
    }

    pub fn points(self, config: &ScoringConfig) -> i64 {
        match self {
            Self::TmDeltaSevere => config.tm_penalty_severe,
            Self::TmDeltaMild => config.tm_penalty_mild,
            Self::ForwardGcHard | Self::ReverseGcHard => config.gc_penalty_hard,
            Self::ForwardGcSoft | Self::ReverseGcSoft => config.gc_penalty_soft,
            Self::ForwardRepeat | Self::ReverseRepeat => config.repeat_penalty,
            Self::Dimer => config.dimer_penalty,
            Self::AmpliconOutOfRange => config.amplicon_penalty,
            Self::AmpliconOversize => config.amplicon_oversize_penalty,
        }
    }

    /// Fails with `EmptySequence` when a GC rule meets an empty primer.
    pub fn applies(
        self,
        candidate: &PrimerCandidate,
        config: &ScoringConfig,
    ) -> Result<bool, PrimerError> {
        let delta = candidate.tm_delta();
        let size = candidate.amplicon_size;
        let applies = match self {
            Self::TmDeltaSevere => delta > config.tm_delta_severe,
            Self::TmDeltaMild => delta > config.tm_delta_mild && delta <= config.tm_delta_severe,
            Self::ForwardGcHard => {
                config.gc_is_hard_violation(gc_content(&candidate.forward_sequence)?)
            }
            Self::ForwardGcSoft => {
                config.gc_is_soft_violation(gc_content(&candidate.forward_sequence)?)
            }
            Self::ReverseGcHard => {
                config.gc_is_hard_violation(gc_content(&candidate.reverse_sequence)?)
            }
            Self::ReverseGcSoft => {
                config.gc_is_soft_violation(gc_content(&candidate.reverse_sequence)?)
            }
            Self::ForwardRepeat => has_long_repeat(&candidate.forward_sequence),
            Self::ReverseRepeat => has_long_repeat(&candidate.reverse_sequence),
            Self::Dimer => dimer_risk_with_window(
                &candidate.forward_sequence,
                &candidate.reverse_sequence,
                config.dimer_window,
            ),
            Self::AmpliconOutOfRange => size < config.amplicon_min || size > config.amplicon_max,
            Self::AmpliconOversize => size > config.amplicon_oversize,
        };
        Ok(applies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub rule: PenaltyRule,
    pub points: i64,
}

/// All penalties that apply to `candidate`, in [`PenaltyRule::ALL`] order.
///
/// An empty forward or reverse sequence is an `EmptySequence` error, never
/// a candidate without GC penalties.
pub fn penalties(
    candidate: &PrimerCandidate,
    config: &ScoringConfig,
) -> Result<Vec<Penalty>, PrimerError> {
    let mut ret = vec![];
    for rule in PenaltyRule::ALL {
        if rule.applies(candidate, config)? {
            ret.push(Penalty {
                rule,
                points: rule.points(config),
            });
        }
    }
    Ok(ret)
}

/// `base_score` minus all `penalties`, saturating at the `i64` bounds.
pub fn total(config: &ScoringConfig, penalties: &[Penalty]) -> i64 {
    penalties
        .iter()
        .fold(config.base_score, |acc, p| acc.saturating_sub(p.points))
}

pub fn score_with(candidate: &PrimerCandidate, config: &ScoringConfig) -> Result<i64, PrimerError> {
    Ok(total(config, &penalties(candidate, config)?))
}

/// Scores `candidate` with the default thresholds. May be negative.
pub fn score(candidate: &PrimerCandidate) -> Result<i64, PrimerError> {
    score_with(candidate, &ScoringConfig::default())
}
