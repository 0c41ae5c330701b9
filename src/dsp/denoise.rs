//! Stationary noise suppression.
//!
//! The noise floor of each frequency bin is its magnitude averaged over the
//! whole recording. A bounded gain removes that floor without ever
//! amplifying a cell or driving it negative.

use crate::constants::spectral::{AMPLITUDE_FLOOR, NOISE_GAIN_FLOOR, TOP_DB};
use ndarray::{Array1, Array2, Axis};

/// Per-bin noise floor: the mean magnitude of each row.
pub fn noise_floor(magnitude: &Array2<f32>) -> Array1<f32> {
    magnitude
        .mean_axis(Axis(1))
        .unwrap_or_else(|| Array1::zeros(magnitude.nrows()))
}

/// Gain in `[0, 1]` for one cell given its bin's noise floor.
pub fn suppression_gain(magnitude: f32, noise: f32) -> f32 {
    (1.0 - noise / (magnitude + NOISE_GAIN_FLOOR)).max(0.0)
}

/// Attenuate the stationary noise floor of `magnitude`.
///
/// The result only drives detection; reconstruction works from the
/// unfiltered spectrum.
pub fn suppress_noise(magnitude: &Array2<f32>) -> Array2<f32> {
    let noise = noise_floor(magnitude);

    let mut filtered = magnitude.clone();
    for (mut row, &floor) in filtered.rows_mut().into_iter().zip(noise.iter()) {
        row.mapv_inplace(|m| m * suppression_gain(m, floor));
    }
    filtered
}

/// `20 * log10(|x| / peak)`, floored at `-TOP_DB`.
///
/// An all-zero matrix has no meaningful peak and is reported entirely at the floor.
pub fn amplitude_to_db(magnitude: &Array2<f32>) -> Array2<f32> {
    let peak = magnitude.iter().fold(0.0f32, |acc, &m| acc.max(m.abs()));
    if peak <= AMPLITUDE_FLOOR {
        return Array2::from_elem(magnitude.raw_dim(), -TOP_DB);
    }

    let ref_db = 20.0 * peak.log10();
    magnitude.mapv(|m| (20.0 * m.abs().max(AMPLITUDE_FLOOR).log10() - ref_db).max(-TOP_DB))
}
