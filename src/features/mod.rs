//! Feature extraction modules
//!
//! - Chroma extraction (pitch-class energy profile)
//! - Key detection

pub mod chroma;
pub mod key;
