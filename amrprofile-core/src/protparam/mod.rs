//! Physicochemical descriptors of protein sequences.
//!
//! [`ProteinAnalysis`] validates a sequence once and then exposes one method
//! per descriptor. Formulas and scale values follow the ExPASy ProtParam tool.
//!
//! ## Examples
//!
//! ```rust
//! use amrprofile_core::protparam::ProteinAnalysis;
//!
//! let analysis = ProteinAnalysis::new("demo", "MKTAYIAKQRQISFVKSHFSRQ")?;
//!
//! println!("MW: {:.2} Da", analysis.molecular_weight());
//! println!("pI: {:.2}", analysis.isoelectric_point());
//! println!("GRAVY: {:.3}", analysis.gravy());
//! # Ok::<(), amrprofile_core::types::AmrError>(())
//! ```

pub mod isoelectric;
pub mod scales;

use crate::constants::{
    CYSTINE_EXTINCTION, FLEXIBILITY_WINDOW, NUM_AMINO_ACIDS, STANDARD_AMINO_ACIDS,
    TRP_EXTINCTION, TYR_EXTINCTION, WATER_AVERAGE_MASS,
};
use crate::types::AmrError;

pub use isoelectric::IsoelectricPoint;
use scales::*;

/// Fractions of residues favouring each secondary-structure class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondaryStructure {
    pub helix: f64,
    pub turn: f64,
    pub sheet: f64,
}

/// Molar extinction coefficient at 280 nm (M⁻¹ cm⁻¹).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtinctionCoefficient {
    /// All cysteines reduced
    pub reduced_cysteines: u32,
    /// All cysteine pairs forming cystines
    pub disulfide_bridges: u32,
}

/// A validated protein sequence ready for descriptor computation.
///
/// Construction upper-cases the sequence and rejects any residue outside the
/// 20 standard amino acids, so every descriptor below is infallible except
/// the windowed flexibility profile.
#[derive(Debug, Clone)]
pub struct ProteinAnalysis {
    id: String,
    /// Table indices of each residue, in sequence order.
    residues: Vec<usize>,
    counts: [u32; NUM_AMINO_ACIDS],
}

impl ProteinAnalysis {
    /// Validates `sequence` and precomputes residue counts.
    ///
    /// # Errors
    ///
    /// - [`AmrError::EmptySequence`] if the sequence has no residues
    /// - [`AmrError::InvalidResidue`] for the first non-standard residue
    pub fn new(id: impl Into<String>, sequence: &str) -> Result<Self, AmrError> {
        let id = id.into();
        if sequence.is_empty() {
            return Err(AmrError::EmptySequence(id));
        }

        let mut residues = Vec::with_capacity(sequence.len());
        let mut counts = [0u32; NUM_AMINO_ACIDS];

        for (position, ch) in sequence.chars().enumerate() {
            let index = u8::try_from(ch.to_ascii_uppercase())
                .ok()
                .and_then(residue_index)
                .ok_or_else(|| AmrError::InvalidResidue {
                    id: id.clone(),
                    residue: ch,
                    position: position + 1,
                })?;
            counts[index] += 1;
            residues.push(index);
        }

        Ok(Self {
            id,
            residues,
            counts,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.residues.len()
    }

    /// Occurrences of each standard residue, indexed like [`scales::residue_index`].
    #[must_use]
    pub fn count_amino_acids(&self) -> [u32; NUM_AMINO_ACIDS] {
        self.counts
    }

    /// Percentage (0-100) of each standard residue.
    #[must_use]
    pub fn amino_acids_percent(&self) -> [f64; NUM_AMINO_ACIDS] {
        self.fractions().map(|f| f * 100.0)
    }

    fn fractions(&self) -> [f64; NUM_AMINO_ACIDS] {
        let length = self.length() as f64;
        self.counts.map(|c| f64::from(c) / length)
    }

    fn fraction_of(&self, residues: &[u8]) -> f64 {
        let fractions = self.fractions();
        residues
            .iter()
            .filter_map(|&aa| residue_index(aa))
            .map(|i| fractions[i])
            .sum()
    }

    /// Average molecular weight in Daltons.
    #[must_use]
    pub fn molecular_weight(&self) -> f64 {
        let free: f64 = self.residues.iter().map(|&i| AVERAGE_MASS[i]).sum();
        free - (self.length() - 1) as f64 * WATER_AVERAGE_MASS
    }

    /// Grand average of hydropathy (Kyte & Doolittle).
    #[must_use]
    pub fn gravy(&self) -> f64 {
        let total: f64 = self.residues.iter().map(|&i| KYTE_DOOLITTLE[i]).sum();
        total / self.length() as f64
    }

    /// Relative frequency of Phe + Trp + Tyr.
    #[must_use]
    pub fn aromaticity(&self) -> f64 {
        self.fraction_of(AROMATIC_RESIDUES)
    }

    /// Instability index; values above 40 predict an unstable protein.
    #[must_use]
    pub fn instability_index(&self) -> f64 {
        let score: f64 = self
            .residues
            .windows(2)
            .map(|pair| DIWV[pair[0]][pair[1]])
            .sum();
        (10.0 / self.length() as f64) * score
    }

    /// Helix, turn, and sheet fractions.
    ///
    /// Leucine counts towards both helix and sheet, so the three fractions
    /// are not complementary.
    #[must_use]
    pub fn secondary_structure_fraction(&self) -> SecondaryStructure {
        SecondaryStructure {
            helix: self.fraction_of(HELIX_RESIDUES),
            turn: self.fraction_of(TURN_RESIDUES),
            sheet: self.fraction_of(SHEET_RESIDUES),
        }
    }

    /// Extinction coefficient from Trp, Tyr, and Cys content.
    #[must_use]
    pub fn molar_extinction_coefficient(&self) -> ExtinctionCoefficient {
        let count = |aa: u8| residue_index(aa).map_or(0, |i| self.counts[i]);
        let reduced = count(b'W') * TRP_EXTINCTION + count(b'Y') * TYR_EXTINCTION;
        ExtinctionCoefficient {
            reduced_cysteines: reduced,
            disulfide_bridges: reduced + (count(b'C') / 2) * CYSTINE_EXTINCTION,
        }
    }

    /// Net charge at the given pH.
    #[must_use]
    pub fn charge_at_ph(&self, ph: f64) -> f64 {
        self.charge_model().charge_at_ph(ph)
    }

    #[must_use]
    pub fn isoelectric_point(&self) -> f64 {
        self.charge_model().pi()
    }

    fn charge_model(&self) -> IsoelectricPoint {
        let first = STANDARD_AMINO_ACIDS[self.residues[0]];
        let last = STANDARD_AMINO_ACIDS[self.residues[self.length() - 1]];
        IsoelectricPoint::new(&self.counts, first, last)
    }

    /// Windowed flexibility profile (window of 9 residues).
    ///
    /// One score per window start in `0..length - 9`. The centre term reads
    /// the residue one past the window midpoint, as ProtParam does.
    ///
    /// # Errors
    ///
    /// [`AmrError::SequenceTooShort`] when the sequence has no complete window.
    pub fn flexibility(&self) -> Result<Vec<f64>, AmrError> {
        let length = self.length();
        if length <= FLEXIBILITY_WINDOW {
            return Err(AmrError::SequenceTooShort {
                id: self.id.clone(),
                length,
                required: FLEXIBILITY_WINDOW + 1,
            });
        }

        let scores = (0..length - FLEXIBILITY_WINDOW)
            .map(|start| {
                let window = &self.residues[start..start + FLEXIBILITY_WINDOW];
                let edges: f64 = FLEXIBILITY_WEIGHTS
                    .iter()
                    .enumerate()
                    .map(|(j, weight)| {
                        let front = FLEXIBILITY[window[j]];
                        let back = FLEXIBILITY[window[FLEXIBILITY_WINDOW - j - 1]];
                        (front + back) * weight
                    })
                    .sum();
                let centre = FLEXIBILITY[window[FLEXIBILITY_WINDOW / 2 + 1]];
                (edges + centre) / FLEXIBILITY_WEIGHT_SUM
            })
            .collect();

        Ok(scores)
    }

    /// Arithmetic mean of [`Self::flexibility`].
    pub fn mean_flexibility(&self) -> Result<f64, AmrError> {
        let profile = self.flexibility()?;
        Ok(profile.iter().sum::<f64>() / profile.len() as f64)
    }
}
