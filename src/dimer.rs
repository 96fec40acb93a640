//! Coarse primer-dimer screen based on short complementary windows.
//!
//! This is a sequence-only proxy, not a thermodynamic model: any window of
//! `seq_a` that also occurs in the reverse complement of `seq_b` is
//! reported as a risk, including overlaps too short to anneal stably.

/// Window length used by [`dimer_risk`].
pub const DIMER_WINDOW: usize = 4;

fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        other => other,
    }
}

/// Reverse complement of `seq` (A<->T, G<->C), uppercased.
/// Characters outside ACGT are kept as they are.
pub fn reverse_complement(seq: &str) -> String {
    seq.to_ascii_uppercase()
        .bytes()
        .rev()
        .map(complement)
        .map(char::from)
        .collect()
}

fn contains_subsequence(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// True if any 4-mer of `seq_a` occurs in the reverse complement of `seq_b`.
pub fn dimer_risk(seq_a: &str, seq_b: &str) -> bool {
    dimer_risk_with_window(seq_a, seq_b, DIMER_WINDOW)
}

/// Like [`dimer_risk`] with a custom window length.
/// A zero-length window, or a `seq_a` shorter than the window, reports no risk.
pub fn dimer_risk_with_window(seq_a: &str, seq_b: &str, window: usize) -> bool {
    if window == 0 {
        return false;
    }
    let seq_a = seq_a.to_ascii_uppercase();
    let seq_b_rc = reverse_complement(seq_b);
    seq_a
        .as_bytes()
        .windows(window)
        .any(|kmer| contains_subsequence(seq_b_rc.as_bytes(), kmer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ATGC"), "GCAT");
        assert_eq!(reverse_complement("gcat"), "ATGC");
        assert_eq!(reverse_complement("AACN"), "NGTT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_dimer_risk() {
        assert!(dimer_risk("ATGC", "GCAT"));
        assert!(dimer_risk("AAAA", "TTTT"));
        assert!(!dimer_risk("AAAA", "CCCC"));
    }

    #[test]
    fn test_dimer_risk_is_case_insensitive() {
        assert!(dimer_risk("atgc", "gcat"));
        assert!(dimer_risk("aaaa", "TtTt"));
    }

    #[test]
    fn test_dimer_risk_short_first_sequence() {
        // fewer than four bases means no window to test
        assert!(!dimer_risk("ATG", "CATCATCAT"));
        assert!(!dimer_risk("", "TTTT"));
    }

    #[test]
    fn test_dimer_risk_window_inside_longer_primers() {
        // reverse complement of the second primer contains "GGAT"
        assert!(dimer_risk("CCCCGGATCCCC", "TTTATCCTTT"));
        assert!(!dimer_risk("ACACACACAC", "ACACACACAC"));
    }

    #[test]
    fn test_dimer_risk_with_window() {
        assert!(dimer_risk_with_window("ATGCA", "TGCAT", 5));
        assert!(!dimer_risk_with_window("ATGCA", "TTTTT", 5));
        assert!(!dimer_risk_with_window("ATGC", "GCAT", 0));
        assert!(!dimer_risk_with_window("ATGC", "GCAT", 5));
    }
}
