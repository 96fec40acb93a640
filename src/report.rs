//! Plain-text and JSON renderings of a ranking.

use crate::error::PrimerError;
use crate::ranking::ScoredCandidate;
use crate::scoring::Penalty;
use crate::sequence_metrics::longest_homopolymer;
use std::fmt::Write;

pub fn ranking_line(scored: &ScoredCandidate) -> String {
    let c = &scored.candidate;
    format!(
        "{}: Score={}, Amplicon={} bp, ΔTm={:.1}",
        c.gene,
        scored.score,
        c.amplicon_size,
        c.tm_delta()
    )
}

pub fn penalty_line(penalty: &Penalty) -> String {
    format!("-{} {}", penalty.points, penalty.rule.description())
}

/// One line per candidate, best first. `top` limits the number of lines.
pub fn ranking_report(ranked: &[ScoredCandidate], top: Option<usize>) -> String {
    let mut ret = String::from("=== PRIMER RANKING ===\n");
    for scored in ranked.iter().take(top.unwrap_or(ranked.len())) {
        ret.push_str(&ranking_line(scored));
        ret.push('\n');
    }
    ret
}

pub fn best_report(best: &ScoredCandidate) -> String {
    let c = &best.candidate;
    let mut ret = String::from("=== BEST GENE FOR DIAGNOSTIC KIT ===\n");
    // writing to a String cannot fail
    let _ = writeln!(ret, "Gene: {}", c.gene);
    let _ = writeln!(ret, "Score: {}", best.score);
    let _ = writeln!(ret, "Amplicon: {} bp", c.amplicon_size);
    let _ = writeln!(ret, "Tm Fw: {}°C", c.forward_melting_temp);
    let _ = writeln!(ret, "Tm Rv: {}°C", c.reverse_melting_temp);
    let _ = writeln!(ret, "Sequence Fw: {}", c.forward_sequence);
    let _ = writeln!(ret, "Sequence Rv: {}", c.reverse_sequence);
    let _ = writeln!(
        ret,
        "Longest run Fw/Rv: {}/{} nt",
        longest_homopolymer(&c.forward_sequence),
        longest_homopolymer(&c.reverse_sequence)
    );
    for penalty in &best.penalties {
        let _ = writeln!(ret, "  {}", penalty_line(penalty));
    }
    ret
}

pub fn ranking_json(ranked: &[ScoredCandidate]) -> Result<String, PrimerError> {
    Ok(serde_json::to_string_pretty(ranked)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::PrimerCandidate;
    use crate::ranking::rank;

    fn ranked() -> Vec<ScoredCandidate> {
        rank(&[
            PrimerCandidate::new("bcsp31", "AACAATGTCC", "GTGATCGAGA", 58.4, 62.0, 223),
            PrimerCandidate::new("omp2a", "AACAATGTCC", "GTGATCGAGA", 60.0, 60.0, 1200),
        ])
        .unwrap()
    }

    #[test]
    fn test_ranking_report() {
        let report = ranking_report(&ranked(), None);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "=== PRIMER RANKING ===",
                "bcsp31: Score=90, Amplicon=223 bp, ΔTm=3.6",
                "omp2a: Score=40, Amplicon=1200 bp, ΔTm=0.0",
            ]
        );
        assert_eq!(ranking_report(&ranked(), Some(1)).lines().count(), 2);
    }

    #[test]
    fn test_best_report() {
        let ranked = ranked();
        let report = best_report(&ranked[0]);
        assert!(report.contains("Gene: bcsp31\n"));
        assert!(report.contains("Score: 90\n"));
        assert!(report.contains("Tm Fw: 58.4°C\n"));
        assert!(report.contains("Tm Rv: 62°C\n"));
        assert!(report.contains("Sequence Rv: GTGATCGAGA\n"));
        assert!(report.contains("Longest run Fw/Rv: 2/1 nt\n"));
        assert!(report.contains("-10 melting temperatures differ\n"));
    }

    #[test]
    fn test_ranking_json() {
        let json = ranking_json(&ranked()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["gene"], "bcsp31");
        assert_eq!(value[0]["score"], 90);
        assert_eq!(value[1]["penalties"][0]["rule"], "AmpliconOutOfRange");
        assert_eq!(value[1]["penalties"][1]["points"], 40);
    }
}
