use std::fs;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;
use log::{debug, warn};

use crate::types::*;

/// Parses FASTA text into records using rust-bio.
///
/// Text before the first header line is ignored. Input without any header
/// yields an empty vector rather than an error, and a record that rust-bio
/// cannot read ends parsing at that point.
pub fn parse_fasta(text: &str) -> Vec<SequenceRecord> {
    let Some(start) = first_header_offset(text) else {
        if !text.trim().is_empty() {
            warn!("Input contains no FASTA header line; no records parsed");
        }
        return Vec::new();
    };

    let body = &text[start..];
    let reader = fasta::Reader::new(body.as_bytes());
    let mut headers = body
        .lines()
        .filter_map(|line| line.strip_prefix('>'))
        .map(str::trim_end);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Stopping FASTA parsing after {} records: {}",
                    records.len(),
                    e
                );
                break;
            }
        };
        let id = record.id().to_string();
        // Full header after '>', separators kept as written
        let description = headers.next().map_or_else(|| id.clone(), str::to_string);
        let sequence = String::from_utf8_lossy(record.seq()).into_owned();
        records.push(SequenceRecord {
            id,
            description,
            sequence,
        });
    }

    debug!("Parsed {} FASTA records", records.len());
    records
}

/// Reads and parses a FASTA file.
///
/// # Errors
///
/// Returns [`AmrError::IoError`] if the file cannot be read and
/// [`AmrError::ParseError`] if it is not valid UTF-8.
pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, AmrError> {
    let text = read_fasta_text(path)?;
    Ok(parse_fasta(&text))
}

/// Reads raw FASTA text from a file.
pub fn read_fasta_text<P: AsRef<Path>>(path: P) -> Result<String, AmrError> {
    let bytes = fs::read(path.as_ref())?;
    String::from_utf8(bytes).map_err(|e| {
        AmrError::ParseError(format!(
            "{} is not valid UTF-8: {}",
            path.as_ref().display(),
            e
        ))
    })
}

/// Reads raw FASTA text from any reader (e.g. stdin).
pub fn read_fasta_from<R: Read>(mut reader: R) -> Result<String, AmrError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| AmrError::ParseError(format!("input is not valid UTF-8: {}", e)))
}

fn first_header_offset(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.starts_with('>') {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
