//! Per-residue property scales.
//!
//! All tables are indexed by [`residue_index`], i.e. in the alphabetical
//! one-letter order of [`STANDARD_AMINO_ACIDS`].

use crate::constants::{NUM_AMINO_ACIDS, STANDARD_AMINO_ACIDS};

/// Maps an upper-case one-letter code to its table index.
#[must_use]
pub const fn residue_index(residue: u8) -> Option<usize> {
    match residue {
        b'A' => Some(0),
        b'C' => Some(1),
        b'D' => Some(2),
        b'E' => Some(3),
        b'F' => Some(4),
        b'G' => Some(5),
        b'H' => Some(6),
        b'I' => Some(7),
        b'K' => Some(8),
        b'L' => Some(9),
        b'M' => Some(10),
        b'N' => Some(11),
        b'P' => Some(12),
        b'Q' => Some(13),
        b'R' => Some(14),
        b'S' => Some(15),
        b'T' => Some(16),
        b'V' => Some(17),
        b'W' => Some(18),
        b'Y' => Some(19),
        _ => None,
    }
}

/// Inverse of [`residue_index`].
#[must_use]
pub const fn residue_letter(index: usize) -> char {
    STANDARD_AMINO_ACIDS[index] as char
}

/// Kyte & Doolittle hydropathy index.
pub const KYTE_DOOLITTLE: [f64; NUM_AMINO_ACIDS] = [
    1.8,  // A
    2.5,  // C
    -3.5, // D
    -3.5, // E
    2.8,  // F
    -0.4, // G
    -3.2, // H
    4.5,  // I
    -3.9, // K
    3.8,  // L
    1.9,  // M
    -3.5, // N
    -1.6, // P
    -3.5, // Q
    -4.5, // R
    -0.8, // S
    -0.7, // T
    4.2,  // V
    -0.9, // W
    -1.3, // Y
];

/// Normalized flexibility parameters (B-values) of Vihinen et al. 1994.
pub const FLEXIBILITY: [f64; NUM_AMINO_ACIDS] = [
    0.984, // A
    0.906, // C
    1.068, // D
    1.094, // E
    0.915, // F
    1.031, // G
    0.950, // H
    0.927, // I
    1.102, // K
    0.935, // L
    0.952, // M
    1.048, // N
    1.049, // P
    1.037, // Q
    1.008, // R
    1.046, // S
    0.997, // T
    0.931, // V
    0.904, // W
    0.929, // Y
];

/// Symmetric weights applied from the window edges towards its centre.
pub const FLEXIBILITY_WEIGHTS: [f64; 4] = [0.25, 0.4375, 0.625, 0.8125];

/// Sum of all window weights including the unit centre weight.
pub const FLEXIBILITY_WEIGHT_SUM: f64 = 5.25;

/// Average masses of free amino acids (Da).
pub const AVERAGE_MASS: [f64; NUM_AMINO_ACIDS] = [
    89.0932,  // A
    121.1582, // C
    133.1027, // D
    147.1293, // E
    165.1891, // F
    75.0666,  // G
    155.1546, // H
    131.1729, // I
    146.1876, // K
    131.1729, // L
    149.2113, // M
    132.1179, // N
    115.1305, // P
    146.1445, // Q
    174.201,  // R
    105.0926, // S
    119.1192, // T
    117.1463, // V
    204.2252, // W
    181.1885, // Y
];

/// Dipeptide instability weight values (Guruprasad et al. 1990).
///
/// `DIWV[first][second]` for the dipeptide `first`-`second`.
#[rustfmt::skip]
pub const DIWV: [[f64; NUM_AMINO_ACIDS]; NUM_AMINO_ACIDS] = [
    //  A       C       D       E       F       G       H       I       K       L       M       N       P       Q       R       S       T       V       W       Y
    [   1.0,  44.94,  -7.49,    1.0,    1.0,    1.0,  -7.49,    1.0,    1.0,    1.0,    1.0,    1.0,  20.26,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0], // A
    [   1.0,    1.0,  20.26,    1.0,    1.0,    1.0,  33.60,    1.0,    1.0,  20.26,  33.60,    1.0,  20.26,  -6.54,    1.0,    1.0,  33.60,  -6.54,  24.68,    1.0], // C
    [   1.0,    1.0,    1.0,    1.0,  -6.54,    1.0,    1.0,    1.0,  -7.49,    1.0,    1.0,    1.0,    1.0,    1.0,  -6.54,  20.26, -14.03,    1.0,    1.0,    1.0], // D
    [   1.0,  44.94,  20.26,  33.60,    1.0,    1.0,  -6.54,  20.26,    1.0,    1.0,    1.0,    1.0,  20.26,  20.26,    1.0,  20.26,    1.0,    1.0, -14.03,    1.0], // E
    [   1.0,    1.0,  13.34,    1.0,    1.0,    1.0,    1.0,    1.0, -14.03,    1.0,    1.0,    1.0,  20.26,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0, 33.601], // F
    [ -7.49,    1.0,    1.0,  -6.54,    1.0,  13.34,    1.0,  -7.49,  -7.49,    1.0,    1.0,  -7.49,    1.0,    1.0,    1.0,    1.0,  -7.49,    1.0,  13.34,  -7.49], // G
    [   1.0,    1.0,    1.0,    1.0,  -9.37,  -9.37,    1.0,  44.94,  24.68,    1.0,    1.0,  24.68,  -1.88,    1.0,    1.0,    1.0,  -6.54,    1.0,  -1.88,  44.94], // H
    [   1.0,    1.0,    1.0,  44.94,    1.0,    1.0,  13.34,    1.0,  -7.49,  20.26,    1.0,    1.0,  -1.88,    1.0,    1.0,    1.0,    1.0,  -7.49,    1.0,    1.0], // I
    [   1.0,    1.0,    1.0,    1.0,    1.0,  -7.49,    1.0,  -7.49,    1.0,  -7.49,  33.60,    1.0,  -6.54,  24.64,  33.60,    1.0,    1.0,  -7.49,    1.0,    1.0], // K
    [   1.0,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,  -7.49,    1.0,    1.0,    1.0,  20.26,  33.60,  20.26,    1.0,    1.0,    1.0,  24.68,    1.0], // L
    [ 13.34,    1.0,    1.0,    1.0,    1.0,    1.0,  58.28,    1.0,    1.0,    1.0,  -1.88,    1.0,  44.94,  -6.54,  -6.54,  44.94,  -1.88,    1.0,    1.0,  24.68], // M
    [   1.0,  -1.88,    1.0,    1.0, -14.03, -14.03,    1.0,  44.94,  24.68,    1.0,    1.0,    1.0,  -1.88,  -6.54,    1.0,    1.0,  -7.49,    1.0,  -9.37,    1.0], // N
    [ 20.26,  -6.54,  -6.54,  18.38,  20.26,    1.0,    1.0,    1.0,    1.0,    1.0,  -6.54,    1.0,  20.26,  20.26,  -6.54,  20.26,    1.0,  20.26,  -1.88,    1.0], // P
    [   1.0,  -6.54,  20.26,  20.26,  -6.54,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,  20.26,  20.26,    1.0,  44.94,    1.0,  -6.54,    1.0,  -6.54], // Q
    [   1.0,    1.0,    1.0,    1.0,    1.0,  -7.49,  20.26,    1.0,    1.0,    1.0,    1.0,  13.34,  20.26,  20.26,  58.28,  44.94,    1.0,    1.0,  58.28,  -6.54], // R
    [   1.0,  33.60,    1.0,  20.26,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,    1.0,  44.94,  20.26,  20.26,  20.26,    1.0,    1.0,    1.0,    1.0], // S
    [   1.0,    1.0,    1.0,  20.26,  13.34,  -7.49,    1.0,    1.0,    1.0,    1.0,    1.0, -14.03,    1.0,  -6.54,    1.0,    1.0,    1.0,    1.0, -14.03,    1.0], // T
    [   1.0,    1.0, -14.03,    1.0,    1.0,  -7.49,    1.0,    1.0,  -1.88,    1.0,    1.0,    1.0,  20.26,    1.0,    1.0,    1.0,  -7.49,    1.0,    1.0,  -6.54], // V
    [-14.03,    1.0,    1.0,    1.0,    1.0,  -9.37,  24.68,    1.0,    1.0,  13.34,  24.68,  13.34,    1.0,    1.0,    1.0,    1.0, -14.03,  -7.49,    1.0,    1.0], // W
    [ 24.68,    1.0,  24.68,  -6.54,    1.0,  -7.49,  13.34,    1.0,    1.0,    1.0,  44.94,    1.0,  13.34,    1.0, -15.91,    1.0,  -7.49,    1.0,  -9.37,  13.34], // Y
];

/// Residues counted towards each secondary-structure class.
pub const HELIX_RESIDUES: &[u8] = b"VIYFWL";
pub const TURN_RESIDUES: &[u8] = b"NPGS";
pub const SHEET_RESIDUES: &[u8] = b"EMAL";

/// Aromatic residues.
pub const AROMATIC_RESIDUES: &[u8] = b"YWF";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_index_round_trip() {
        for (i, &aa) in STANDARD_AMINO_ACIDS.iter().enumerate() {
            assert_eq!(residue_index(aa), Some(i));
            assert_eq!(residue_letter(i), aa as char);
        }
    }

    #[test]
    fn test_residue_index_rejects_non_standard() {
        for aa in [b'B', b'J', b'O', b'U', b'X', b'Z', b'*', b'-', b'a'] {
            assert_eq!(residue_index(aa), None);
        }
    }

    #[test]
    fn test_flexibility_weight_sum() {
        let sum: f64 = FLEXIBILITY_WEIGHTS.iter().sum::<f64>() * 2.0 + 1.0;
        assert!((sum - FLEXIBILITY_WEIGHT_SUM).abs() < 1e-12);
    }

    #[test]
    fn test_diwv_known_entries() {
        let idx = |c: u8| residue_index(c).unwrap();
        assert!((DIWV[idx(b'A')][idx(b'C')] - 44.94).abs() < 1e-9);
        assert!((DIWV[idx(b'Y')][idx(b'R')] - -15.91).abs() < 1e-9);
        assert!((DIWV[idx(b'M')][idx(b'H')] - 58.28).abs() < 1e-9);
        assert!((DIWV[idx(b'R')][idx(b'W')] - 58.28).abs() < 1e-9);
    }
}
