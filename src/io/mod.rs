//! Audio I/O modules
//!
//! Raw PCM stream reading, file decoding using Symphonia, and analysis
//! window selection.

pub mod decoder;
pub mod excerpt;
pub mod pcm;
