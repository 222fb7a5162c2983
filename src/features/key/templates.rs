//! Krumhansl-Schmuckler key templates
//!
//! Two reference profiles (C major, C minor); the other 22 keys are obtained
//! by rotating a reference profile by the key's semitone offset from C.

use crate::analysis::result::{Key, Mode};

/// Krumhansl-Schmuckler C major profile (index 0 = C)
pub const MAJOR_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Krumhansl-Schmuckler C minor profile (index 0 = C)
pub const MINOR_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Rotate a 12-bin profile right by `offset` positions
///
/// Output index `i` takes input index `(i - offset) mod 12`, so index 0 of the
/// input lands on pitch class `offset`.
pub fn rotate(profile: &[f32; 12], offset: usize) -> [f32; 12] {
    let mut out = [0.0f32; 12];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = profile[(i + 12 - offset % 12) % 12];
    }
    out
}

/// Key templates for all 24 keys
#[derive(Debug, Clone, Copy)]
pub struct KeyTemplates {
    major: [f32; 12],
    minor: [f32; 12],
}

impl KeyTemplates {
    /// Create key templates from the Krumhansl-Schmuckler profiles
    pub const fn new() -> Self {
        Self {
            major: MAJOR_PROFILE,
            minor: MINOR_PROFILE,
        }
    }

    /// Major template with tonic at `root`
    pub fn major(&self, root: u32) -> [f32; 12] {
        rotate(&self.major, root as usize)
    }

    /// Minor template with tonic at `root`
    pub fn minor(&self, root: u32) -> [f32; 12] {
        rotate(&self.minor, root as usize)
    }

    /// Template for `key`
    pub fn template(&self, key: Key) -> [f32; 12] {
        match key.mode() {
            Mode::Major => self.major(key.root()),
            Mode::Minor => self.minor(key.root()),
        }
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_zero_is_identity() {
        assert_eq!(rotate(&MAJOR_PROFILE, 0), MAJOR_PROFILE);
        assert_eq!(rotate(&MAJOR_PROFILE, 12), MAJOR_PROFILE);
    }

    #[test]
    fn test_rotate_moves_tonic() {
        let g_major = rotate(&MAJOR_PROFILE, 7);
        assert_eq!(g_major[7], MAJOR_PROFILE[0]);
        assert_eq!(g_major[2], MAJOR_PROFILE[7]); // D is the fifth of G
        assert_eq!(g_major[0], MAJOR_PROFILE[5]);
    }

    #[test]
    fn test_rotate_does_not_mutate_profile() {
        let before = MINOR_PROFILE;
        let _ = rotate(&MINOR_PROFILE, 3);
        assert_eq!(MINOR_PROFILE, before);
    }

    #[test]
    fn test_template_lookup() {
        let templates = KeyTemplates::new();
        assert_eq!(templates.template(Key::Minor(9))[9], MINOR_PROFILE[0]);
        assert_eq!(templates.template(Key::Major(5)), rotate(&MAJOR_PROFILE, 5));
    }
}
