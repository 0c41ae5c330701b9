//! Frequency gating for detection.

use crate::constants::spectral::GATE_UPPER_TOLERANCE;

/// Select bins whose center frequency lies in `lo..=hi + 10% of hi`.
///
/// The tolerance only widens detection; reconstruction masks use the exact band.
pub fn frequency_gate(frequencies: &[f64], frequency_range: (f64, f64)) -> Vec<bool> {
    let (lo, hi) = frequency_range;
    let upper = hi + GATE_UPPER_TOLERANCE * hi;
    frequencies
        .iter()
        .map(|&f| (lo..=upper).contains(&f))
        .collect()
}
