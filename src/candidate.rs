//! Primer-pair candidates and their normalization from tabular records.

use crate::error::{ErrorCode, PrimerError};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_DELIMITER: u8 = b'\t';

pub const GENE_COLUMNS: &[&str] = &["Gen", "gene"];
pub const FORWARD_SEQUENCE_COLUMNS: &[&str] = &["Primer_Fw", "forward_sequence"];
pub const REVERSE_SEQUENCE_COLUMNS: &[&str] = &["Primer_Rv", "reverse_sequence"];
pub const FORWARD_TM_COLUMNS: &[&str] = &["Tm_Fw", "forward_melting_temp"];
pub const REVERSE_TM_COLUMNS: &[&str] = &["Tm_Rv", "reverse_melting_temp"];
pub const AMPLICON_SIZE_COLUMNS: &[&str] = &["Tamaño_Producto", "amplicon_size"];

const KNOWN_COLUMNS: &[&[&str]] = &[
    GENE_COLUMNS,
    FORWARD_SEQUENCE_COLUMNS,
    REVERSE_SEQUENCE_COLUMNS,
    FORWARD_TM_COLUMNS,
    REVERSE_TM_COLUMNS,
    AMPLICON_SIZE_COLUMNS,
];

/// One forward/reverse primer pair proposed for a target gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimerCandidate {
    pub gene: String,
    pub forward_sequence: String,
    pub reverse_sequence: String,
    pub forward_melting_temp: f64,
    pub reverse_melting_temp: f64,
    pub amplicon_size: usize,
    /// Columns of the source record that are not part of the primer pair.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PrimerCandidate {
    pub fn new(
        gene: &str,
        forward_sequence: &str,
        reverse_sequence: &str,
        forward_melting_temp: f64,
        reverse_melting_temp: f64,
        amplicon_size: usize,
    ) -> Self {
        Self {
            gene: gene.to_string(),
            forward_sequence: forward_sequence.to_ascii_uppercase(),
            reverse_sequence: reverse_sequence.to_ascii_uppercase(),
            forward_melting_temp,
            reverse_melting_temp,
            amplicon_size,
            extra: BTreeMap::new(),
        }
    }

    /// Absolute difference between the two melting temperatures.
    pub fn tm_delta(&self) -> f64 {
        (self.forward_melting_temp - self.reverse_melting_temp).abs()
    }

    /// Builds a candidate from a record of named string fields.
    ///
    /// Every field is validated here so that scoring never sees an empty
    /// sequence or an unparseable number.
    pub fn from_record(record: &HashMap<String, String>) -> Result<Self, PrimerError> {
        let gene = Self::field(record, GENE_COLUMNS)?.to_string();
        let forward_sequence =
            Self::normalize_sequence(Self::field(record, FORWARD_SEQUENCE_COLUMNS)?, "forward")?;
        let reverse_sequence =
            Self::normalize_sequence(Self::field(record, REVERSE_SEQUENCE_COLUMNS)?, "reverse")?;
        let forward_melting_temp = Self::parse_temperature(record, FORWARD_TM_COLUMNS)?;
        let reverse_melting_temp = Self::parse_temperature(record, REVERSE_TM_COLUMNS)?;
        let amplicon_size = Self::parse_amplicon_size(record)?;

        let extra = record
            .iter()
            .filter(|(k, _)| !KNOWN_COLUMNS.iter().any(|names| names.contains(&k.as_str())))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        Ok(Self {
            gene,
            forward_sequence,
            reverse_sequence,
            forward_melting_temp,
            reverse_melting_temp,
            amplicon_size,
            extra,
        })
    }

    fn field<'a>(
        record: &'a HashMap<String, String>,
        names: &[&str],
    ) -> Result<&'a str, PrimerError> {
        names
            .iter()
            .find_map(|name| record.get(*name))
            .map(|v| v.trim())
            .ok_or_else(|| {
                PrimerError::invalid_input(format!("Missing column '{}'", names.join("' or '")))
            })
    }

    fn normalize_sequence(value: &str, which: &str) -> Result<String, PrimerError> {
        let upper = value.to_ascii_uppercase();
        if upper.is_empty() {
            return Err(PrimerError::invalid_input(format!(
                "Empty {which} primer sequence"
            )));
        }
        if let Some(bad) = upper.chars().find(|c| !Self::is_nucleotide_letter(*c)) {
            return Err(PrimerError::invalid_input(format!(
                "Invalid nucleotide '{bad}' in {which} primer '{value}'"
            )));
        }
        Ok(upper)
    }

    // ACGT plus IUPAC ambiguity codes, so degenerate primers pass through
    fn is_nucleotide_letter(c: char) -> bool {
        matches!(
            c,
            'A' | 'C' | 'G' | 'T' | 'W' | 'S' | 'M' | 'K' | 'R' | 'Y' | 'B' | 'D' | 'H' | 'V' | 'N'
        )
    }

    fn parse_temperature(
        record: &HashMap<String, String>,
        names: &[&str],
    ) -> Result<f64, PrimerError> {
        let text = Self::field(record, names)?;
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(PrimerError::invalid_input(format!(
                "Melting temperature '{text}' in column '{}' is not a number",
                names[0]
            ))),
        }
    }

    fn parse_amplicon_size(record: &HashMap<String, String>) -> Result<usize, PrimerError> {
        let text = Self::field(record, AMPLICON_SIZE_COLUMNS)?;
        match text.parse::<usize>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(PrimerError::invalid_input(format!(
                "Amplicon size '{text}' is not a positive integer"
            ))),
        }
    }
}

/// Reads a delimited table with a header row into validated candidates.
///
/// Loading stops at the first bad row; no partial result is returned.
pub fn load_candidates_from_reader<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<PrimerCandidate>, PrimerError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut candidates = vec![];
    for (idx, record) in rdr.deserialize::<HashMap<String, String>>().enumerate() {
        let record = record?;
        let candidate = PrimerCandidate::from_record(&record).map_err(|e| {
            PrimerError::new(e.code, format!("Row {}: {}", idx + 1, e.message))
        })?;
        candidates.push(candidate);
    }
    log::debug!("Read {} primer candidates", candidates.len());
    Ok(candidates)
}

pub fn load_candidates_from_path<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> Result<Vec<PrimerCandidate>, PrimerError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PrimerError::new(
            ErrorCode::Io,
            format!("Could not open primer table '{}': {e}", path.display()),
        )
    })?;
    load_candidates_from_reader(file, delimiter)
}
