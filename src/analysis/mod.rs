//! Analysis result modules
//!
//! Key, mode and estimate types plus the flat output record.

pub mod result;
