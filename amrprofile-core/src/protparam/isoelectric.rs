//! Net charge and isoelectric point from residue pK values.
//!
//! Side-chain pK values follow Bjellqvist et al.; the N- and C-terminal pK
//! values are adjusted when the terminal residue has a tabulated override.

use crate::constants::NUM_AMINO_ACIDS;

use super::scales::residue_index;

/// Side chains that carry a positive charge below their pK.
const POSITIVE_SIDE_CHAINS: [(u8, f64); 3] = [(b'K', 10.0), (b'R', 12.0), (b'H', 5.98)];

/// Side chains that carry a negative charge above their pK.
const NEGATIVE_SIDE_CHAINS: [(u8, f64); 4] = [(b'D', 4.05), (b'E', 4.45), (b'C', 9.0), (b'Y', 10.0)];

const N_TERMINUS_PK: f64 = 7.5;
const C_TERMINUS_PK: f64 = 3.55;

const N_TERMINAL_OVERRIDES: [(u8, f64); 7] = [
    (b'A', 7.59),
    (b'M', 7.0),
    (b'S', 6.93),
    (b'P', 8.36),
    (b'T', 6.82),
    (b'V', 7.44),
    (b'E', 7.7),
];

const C_TERMINAL_OVERRIDES: [(u8, f64); 2] = [(b'D', 4.55), (b'E', 4.75)];

/// Bisection bounds and stopping width for the isoelectric point search.
const PI_START_PH: f64 = 7.775;
const PI_MIN_PH: f64 = 4.05;
const PI_MAX_PH: f64 = 12.0;
const PI_TOLERANCE: f64 = 0.0001;

/// Charge model for one sequence: ionizable group counts with their pK values.
#[derive(Debug, Clone)]
pub struct IsoelectricPoint {
    /// (count, pK) of every positively charged group, N-terminus included.
    positive: Vec<(f64, f64)>,
    /// (count, pK) of every negatively charged group, C-terminus included.
    negative: Vec<(f64, f64)>,
}

impl IsoelectricPoint {
    /// Builds the charge model from residue counts and the terminal residues.
    ///
    /// `counts` is indexed like [`super::scales::residue_index`].
    pub fn new(counts: &[u32; NUM_AMINO_ACIDS], n_terminal: u8, c_terminal: u8) -> Self {
        let count_of = |aa: u8| residue_index(aa).map_or(0.0, |i| f64::from(counts[i]));

        let n_terminus_pk = lookup(&N_TERMINAL_OVERRIDES, n_terminal).unwrap_or(N_TERMINUS_PK);
        let c_terminus_pk = lookup(&C_TERMINAL_OVERRIDES, c_terminal).unwrap_or(C_TERMINUS_PK);

        let mut positive = vec![(1.0, n_terminus_pk)];
        positive.extend(POSITIVE_SIDE_CHAINS.iter().map(|&(aa, pk)| (count_of(aa), pk)));

        let mut negative = vec![(1.0, c_terminus_pk)];
        negative.extend(NEGATIVE_SIDE_CHAINS.iter().map(|&(aa, pk)| (count_of(aa), pk)));

        Self { positive, negative }
    }

    /// Net charge of the molecule at the given pH.
    #[must_use]
    pub fn charge_at_ph(&self, ph: f64) -> f64 {
        let positive: f64 = self
            .positive
            .iter()
            .map(|&(count, pk)| count / (10f64.powf(ph - pk) + 1.0))
            .sum();
        let negative: f64 = self
            .negative
            .iter()
            .map(|&(count, pk)| count / (10f64.powf(pk - ph) + 1.0))
            .sum();
        positive - negative
    }

    /// pH at which the net charge crosses zero, found by bisection.
    #[must_use]
    pub fn pi(&self) -> f64 {
        let mut ph = PI_START_PH;
        let mut min = PI_MIN_PH;
        let mut max = PI_MAX_PH;

        while max - min > PI_TOLERANCE {
            if self.charge_at_ph(ph) > 0.0 {
                min = ph;
            } else {
                max = ph;
            }
            ph = (min + max) / 2.0;
        }
        ph
    }
}

fn lookup(table: &[(u8, f64)], residue: u8) -> Option<f64> {
    table
        .iter()
        .find(|&&(aa, _)| aa == residue)
        .map(|&(_, pk)| pk)
}
