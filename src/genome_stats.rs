//! Size and GC statistics for an assembled genome fragment.
//! Independent of primer scoring.

use crate::error::{ErrorCode, PrimerError};
use crate::sequence_metrics::gc_content;
use bio::io::fasta;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGenome {
    pub name: String,
    pub size_bp: usize,
    pub gc_percent: f64,
}

impl Default for ReferenceGenome {
    fn default() -> Self {
        Self {
            name: "B. suis".to_string(),
            size_bp: 3_300_000,
            gc_percent: 57.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeStats {
    pub id: String,
    pub size_bp: usize,
    pub gc_percent: f64,
}

impl GenomeStats {
    pub fn from_sequence(id: &str, seq: &[u8]) -> Result<Self, PrimerError> {
        let text = String::from_utf8_lossy(seq);
        Ok(Self {
            id: id.to_string(),
            size_bp: seq.len(),
            gc_percent: gc_content(&text)?,
        })
    }

    /// Statistics of the first record in a FASTA stream.
    pub fn from_fasta_reader<R: Read>(reader: R) -> Result<Self, PrimerError> {
        let record = fasta::Reader::new(reader)
            .records()
            .next()
            .ok_or_else(|| PrimerError::invalid_input("FASTA input contains no records"))?
            .map_err(|e| PrimerError::new(ErrorCode::Parse, format!("Malformed FASTA: {e}")))?;
        Self::from_sequence(record.id(), record.seq())
    }

    pub fn from_fasta_path<P: AsRef<Path>>(path: P) -> Result<Self, PrimerError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PrimerError::new(
                ErrorCode::Io,
                format!("Could not open FASTA file '{}': {e}", path.display()),
            )
        })?;
        Self::from_fasta_reader(file)
    }

    pub fn report(&self, reference: Option<&ReferenceGenome>) -> String {
        let mut ret = String::from("=== GENOME STATISTICS ===\n");
        let _ = writeln!(ret, "Size: {} bp", thousands(self.size_bp));
        let _ = writeln!(ret, "GC: {:.2}%", self.gc_percent);
        if let Some(reference) = reference {
            ret.push_str("\n=== COMPARISON ===\n");
            let _ = writeln!(
                ret,
                "{} (complete genome): {:.1} Mb, {:.1}% GC",
                reference.name,
                reference.size_bp as f64 / 1_000_000.0,
                reference.gc_percent
            );
            let _ = writeln!(
                ret,
                "This fragment: {:.1} kb, {:.2}% GC",
                self.size_bp as f64 / 1000.0,
                self.gc_percent
            );
        }
        ret
    }
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut ret = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            ret.push(',');
        }
        ret.push(c);
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(3_300_000), "3,300,000");
    }

    #[test]
    fn test_from_fasta_reader_uses_first_record() {
        let fasta = b">scaffold_1 final\nGGCCAT\nATGC\n>scaffold_2\nAAAA\n";
        let stats = GenomeStats::from_fasta_reader(&fasta[..]).unwrap();
        assert_eq!(stats.id, "scaffold_1");
        assert_eq!(stats.size_bp, 10);
        assert_eq!(stats.gc_percent, 60.0);
    }

    #[test]
    fn test_from_fasta_reader_without_records() {
        let err = GenomeStats::from_fasta_reader(&b""[..]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_empty_record_has_no_gc() {
        let err = GenomeStats::from_sequence("empty", b"").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptySequence);
    }

    #[test]
    fn test_report() {
        let stats = GenomeStats::from_sequence("x", "GC".repeat(600).as_bytes()).unwrap();
        let report = stats.report(Some(&ReferenceGenome::default()));
        assert!(report.contains("Size: 1,200 bp\n"));
        assert!(report.contains("GC: 100.00%\n"));
        assert!(report.contains("B. suis (complete genome): 3.3 Mb, 57.2% GC\n"));
        assert!(report.contains("This fragment: 1.2 kb, 100.00% GC\n"));
        assert!(!stats.report(None).contains("COMPARISON"));
    }
}
