//! Joining classifier labels back onto sequence identifiers.

use log::{debug, warn};

use crate::results::Prediction;
use crate::sequence::parse_fasta;
use crate::types::{AmrError, ResistanceProfile};

/// Pairs raw labels with the identifiers of the records in `fasta_text`.
///
/// The text is parsed again only to recover identifiers. Labels and records
/// are matched by position; if the counts differ the extra entries on the
/// longer side are dropped with a warning.
///
/// # Errors
///
/// [`AmrError::Prediction`] if a label is neither `0` nor `1`.
///
/// # Examples
///
/// ```rust
/// use amrprofile_core::predict::build_predictions;
/// use amrprofile_core::types::ResistanceProfile;
///
/// let predictions = build_predictions(&[1, 0], ">a\nMKV\n>b\nMLL\n")?;
/// assert_eq!(predictions[0].id, "a");
/// assert_eq!(predictions[1].profile, ResistanceProfile::Sensitive);
/// # Ok::<(), amrprofile_core::types::AmrError>(())
/// ```
pub fn build_predictions(labels: &[u8], fasta_text: &str) -> Result<Vec<Prediction>, AmrError> {
    let records = parse_fasta(fasta_text);
    if records.len() != labels.len() {
        warn!(
            "Got {} labels for {} records; pairing by position",
            labels.len(),
            records.len()
        );
    }

    let predictions = records
        .into_iter()
        .zip(labels)
        .map(|(record, &label)| Ok(Prediction::new(record.id, ResistanceProfile::try_from(label)?)))
        .collect::<Result<Vec<_>, AmrError>>()?;

    debug!("Built {} predictions", predictions.len());
    Ok(predictions)
}
