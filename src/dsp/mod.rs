//! Detection and resynthesis building blocks.
//!
//! Each stage is a pure function over owned `ndarray` buffers; the stages are
//! wired together by [`crate::pipeline::isolate()`].

mod denoise;
mod gate;
mod mask;
mod resynth;
mod segments;
mod stft;

pub use denoise::{amplitude_to_db, noise_floor, suppress_noise, suppression_gain};
pub use gate::frequency_gate;
pub use mask::build_mask;
pub use resynth::{ResynthesisParams, apply_boundary_fades, fade_samples, resynthesize};
pub use segments::{Segment, active_intervals, detect_segments, frame_activity, tail_pad_frames};
pub use stft::{SpectralAnalysis, fft_frequencies, frame_times, hann_window, inverse_stft, stft};
