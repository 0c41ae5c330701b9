//! Audio decoding and encoding.

mod decode;
mod encode;

pub use decode::{DecodedAudio, decode_audio_file};
pub use encode::{to_pcm16, write_wav};
