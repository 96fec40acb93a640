//! Per-sequence metrics: GC content and homopolymer runs.

use crate::error::PrimerError;
use lazy_static::lazy_static;
use regex::Regex;

/// Shortest homopolymer run that counts as a destabilizing repeat.
pub const LONG_REPEAT_RUN: usize = 5;

lazy_static! {
    static ref LONG_REPEAT: Regex = Regex::new(&format!(
        "(?i)A{{{n},}}|C{{{n},}}|G{{{n},}}|T{{{n},}}",
        n = LONG_REPEAT_RUN
    ))
    .expect("homopolymer pattern is a valid regex");
}

/// Percentage (0-100) of G and C characters in `seq`.
///
/// The denominator is the full length of `seq`, so characters other than
/// A, C, G and T still count towards it. Case-insensitive.
pub fn gc_content(seq: &str) -> Result<f64, PrimerError> {
    let (gc, total) = seq.chars().fold((0usize, 0usize), |(gc, total), c| {
        match c.to_ascii_uppercase() {
            'G' | 'C' => (gc + 1, total + 1),
            _ => (gc, total + 1),
        }
    });
    if total == 0 {
        return Err(PrimerError::empty_sequence());
    }
    Ok(100.0 * gc as f64 / total as f64)
}

/// True if `seq` contains a run of at least five identical A, C, G or T bases.
pub fn has_long_repeat(seq: &str) -> bool {
    LONG_REPEAT.is_match(seq)
}

/// Length of the longest run of one repeated nucleotide (A, C, G or T).
/// Other characters break runs and never start one.
pub fn longest_homopolymer(seq: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut last: Option<char> = None;

    for c in seq.chars().map(|c| c.to_ascii_uppercase()) {
        if !matches!(c, 'A' | 'C' | 'G' | 'T') {
            last = None;
            current = 0;
            continue;
        }
        if last == Some(c) {
            current += 1;
        } else {
            current = 1;
            last = Some(c);
        }
        longest = longest.max(current);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content("ATGCATGCAT").unwrap(), 40.0);
        assert_eq!(gc_content("GCGC").unwrap(), 100.0);
        assert_eq!(gc_content("ATAT").unwrap(), 0.0);
        assert_eq!(gc_content("gcAT").unwrap(), 50.0);
    }

    #[test]
    fn test_gc_content_counts_unknown_bases_in_length() {
        // N is not G/C but still part of the denominator
        assert_eq!(gc_content("GCNN").unwrap(), 50.0);
    }

    #[test]
    fn test_gc_content_empty_sequence_fails() {
        let err = gc_content("").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptySequence);
    }

    #[test]
    fn test_gc_content_is_a_percentage() {
        for seq in ["A", "G", "ACGT", "GGGGC", "TTTTTTTTTTTC", "CAGTCAGTCCG"] {
            let gc = gc_content(seq).unwrap();
            assert!((0.0..=100.0).contains(&gc));
            let all_gc = seq.chars().all(|c| c == 'G' || c == 'C');
            assert_eq!(gc == 100.0, all_gc, "{seq}");
        }
    }

    #[test]
    fn test_has_long_repeat() {
        assert!(has_long_repeat("AAAAA"));
        assert!(has_long_repeat("CGTTTTTTAC"));
        assert!(has_long_repeat("acgggggt"));
        assert!(!has_long_repeat("ATATAT"));
        assert!(!has_long_repeat("AAAA"));
        assert!(!has_long_repeat("AAAACCCCGGGGTTTT"));
    }

    #[test]
    fn test_has_long_repeat_ignores_other_characters() {
        assert!(!has_long_repeat("NNNNNNN"));
        assert!(!has_long_repeat("AANAAA"));
    }

    #[test]
    fn test_longest_homopolymer() {
        assert_eq!(longest_homopolymer(""), 0);
        assert_eq!(longest_homopolymer("ACGT"), 1);
        assert_eq!(longest_homopolymer("ACCCGTTTTA"), 4);
        assert_eq!(longest_homopolymer("ggggga"), 5);
        assert_eq!(longest_homopolymer("AANAA"), 2);
    }
}
