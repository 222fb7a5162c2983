//! Analysis result types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Pitch class names, index 0 = C, ascending by semitone (sharps only)
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

// Circle of fifths orderings used by the DJ numerical notation.
const CIRCLE_OF_FIFTHS_MAJOR: [u32; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5]; // C, G, D, A, E, B, F#, C#, G#, D#, A#, F
const CIRCLE_OF_FIFTHS_MINOR: [u32; 12] = [9, 4, 11, 6, 1, 8, 3, 10, 5, 0, 7, 2]; // Am, Em, Bm, F#m, C#m, G#m, D#m, A#m, Fm, Cm, Gm, Dm

/// Key mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major mode
    Major,
    /// Minor mode
    Minor,
}

impl Mode {
    /// Lowercase mode name ("major" / "minor")
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Musical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Key {
    /// Build a key from a root pitch class and a mode
    ///
    /// The root is reduced modulo 12.
    pub fn from_parts(root: u32, mode: Mode) -> Self {
        match mode {
            Mode::Major => Key::Major(root % 12),
            Mode::Minor => Key::Minor(root % 12),
        }
    }

    /// Root pitch class (0-11)
    pub fn root(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => *i % 12,
        }
    }

    /// Key mode
    pub fn mode(&self) -> Mode {
        match self {
            Key::Major(_) => Mode::Major,
            Key::Minor(_) => Mode::Minor,
        }
    }

    /// Root name (e.g. "C", "F#")
    pub fn root_name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.root() as usize]
    }

    /// Root and mode separated by a space (e.g. "A minor", "C# major")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.root_name(), self.mode())
    }

    /// Get key name in short musical notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use tonic_dsp::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(0).name(), "C");
    /// assert_eq!(Key::Major(6).name(), "F#");
    /// assert_eq!(Key::Minor(9).name(), "Am");
    /// ```
    pub fn name(&self) -> String {
        match self {
            Key::Major(_) => self.root_name().to_string(),
            Key::Minor(_) => format!("{}m", self.root_name()),
        }
    }

    /// Get key in DJ numerical notation (e.g., "1A", "2B", "12A")
    ///
    /// Major keys are numbered 1A-12A and minor keys 1B-12B, each step moving
    /// up a fifth. 1A = C, 1B = Am (relative keys share a number).
    ///
    /// # Example
    ///
    /// ```
    /// use tonic_dsp::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(0).numerical(), "1A");
    /// assert_eq!(Key::Major(7).numerical(), "2A");
    /// assert_eq!(Key::Minor(9).numerical(), "1B");
    /// ```
    pub fn numerical(&self) -> String {
        let (order, suffix) = match self {
            Key::Major(_) => (&CIRCLE_OF_FIFTHS_MAJOR, 'A'),
            Key::Minor(_) => (&CIRCLE_OF_FIFTHS_MINOR, 'B'),
        };
        let root = self.root();
        let position = order.iter().position(|&x| x == root).unwrap_or(0);
        format!("{}{}", position + 1, suffix)
    }

    /// Parse DJ numerical notation back to a key
    ///
    /// Returns `None` for anything outside 1A-12A / 1B-12B.
    pub fn from_numerical(notation: &str) -> Option<Self> {
        if notation.len() < 2 || !notation.is_char_boundary(notation.len() - 1) {
            return None;
        }

        let (num_str, suffix) = notation.split_at(notation.len() - 1);
        let num: usize = num_str.parse().ok()?;

        if !(1..=12).contains(&num) {
            return None;
        }

        match suffix {
            "A" => Some(Key::Major(CIRCLE_OF_FIFTHS_MAJOR[num - 1])),
            "B" => Some(Key::Minor(CIRCLE_OF_FIFTHS_MINOR[num - 1])),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root_name(), self.mode())
    }
}

impl FromStr for Key {
    type Err = AnalysisError;

    /// Accepts "A minor", "C# major", and the short forms "Am", "C#".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AnalysisError::InvalidInput(format!("Unrecognized key: {:?}", s));

        let (root_str, mode) = match s.split_once(char::is_whitespace) {
            Some((root, mode)) => {
                let mode = match mode.trim().to_ascii_lowercase().as_str() {
                    "major" => Mode::Major,
                    "minor" => Mode::Minor,
                    _ => return Err(invalid()),
                };
                (root, mode)
            }
            None => match s.strip_suffix('m') {
                Some(root) => (root, Mode::Minor),
                None => (s, Mode::Major),
            },
        };

        let root = PITCH_CLASS_NAMES
            .iter()
            .position(|&name| name == root_str)
            .ok_or_else(invalid)?;

        Ok(Key::from_parts(root as u32, mode))
    }
}

/// Key estimate for one clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEstimate {
    /// Best-matching key
    pub key: Key,

    /// Confidence (0.0-1.0): the winning correlation clamped to [0, 1]
    pub confidence: f32,

    /// Raw Pearson correlation of the winning hypothesis, in [-1, 1]
    pub correlation: f32,

    /// True when the chroma had zero variance and `key` is the C major fallback
    pub degenerate: bool,
}

impl KeyEstimate {
    /// Fallback estimate for chroma with no pitch-class contrast
    pub fn fallback() -> Self {
        Self {
            key: Key::Major(0),
            confidence: 0.0,
            correlation: 0.0,
            degenerate: true,
        }
    }
}

/// Flat output record for one analysed clip
///
/// Serializes as `{"key": "A minor", "keyName": "A", "scale": "minor", "confidence": 0.93}`.
/// Degraded records carry `key: "Unknown"`, `scale: "unknown"`, confidence 0 and
/// an `error` message instead of `keyName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyReport {
    /// Display string ("<Root> <mode>" or "Unknown")
    pub key: String,

    /// Root name only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,

    /// Mode name ("major", "minor" or "unknown")
    pub scale: String,

    /// Confidence (0.0-1.0)
    pub confidence: f32,

    /// Diagnostic message when an upstream stage failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeyReport {
    /// Degraded record carrying an error message
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            key: "Unknown".to_string(),
            key_name: None,
            scale: "unknown".to_string(),
            confidence: 0.0,
            error: Some(error.into()),
        }
    }

    /// True when this record came from a failed analysis
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Parsed key, if the record holds one
    pub fn parsed_key(&self) -> Option<Key> {
        self.key.parse().ok()
    }
}

impl From<KeyEstimate> for KeyReport {
    fn from(estimate: KeyEstimate) -> Self {
        Self {
            key: estimate.key.display_name(),
            key_name: Some(estimate.key.root_name().to_string()),
            scale: estimate.key.mode().as_str().to_string(),
            confidence: estimate.confidence,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name_major() {
        assert_eq!(Key::Major(0).name(), "C");
        assert_eq!(Key::Major(1).name(), "C#");
        assert_eq!(Key::Major(6).name(), "F#");
        assert_eq!(Key::Major(11).name(), "B");
    }

    #[test]
    fn test_key_name_minor() {
        assert_eq!(Key::Minor(0).name(), "Cm");
        assert_eq!(Key::Minor(9).name(), "Am");
        assert_eq!(Key::Minor(11).name(), "Bm");
    }

    #[test]
    fn test_display_name_uses_sharps() {
        assert_eq!(Key::Minor(9).display_name(), "A minor");
        assert_eq!(Key::Major(10).display_name(), "A# major");
        assert_eq!(Key::Minor(3).to_string(), "D# minor");
    }

    #[test]
    fn test_from_parts_wraps_root() {
        assert_eq!(Key::from_parts(14, Mode::Major), Key::Major(2));
        assert_eq!(Key::from_parts(9, Mode::Minor).root(), 9);
        assert_eq!(Key::from_parts(9, Mode::Minor).mode(), Mode::Minor);
    }

    #[test]
    fn test_key_numerical() {
        assert_eq!(Key::Major(0).numerical(), "1A"); // C
        assert_eq!(Key::Major(7).numerical(), "2A"); // G
        assert_eq!(Key::Major(5).numerical(), "12A"); // F
        assert_eq!(Key::Minor(9).numerical(), "1B"); // Am
        assert_eq!(Key::Minor(4).numerical(), "2B"); // Em
        assert_eq!(Key::Minor(2).numerical(), "12B"); // Dm
    }

    #[test]
    fn test_key_from_numerical() {
        assert_eq!(Key::from_numerical("1A"), Some(Key::Major(0)));
        assert_eq!(Key::from_numerical("7A"), Some(Key::Major(6)));
        assert_eq!(Key::from_numerical("10B"), Some(Key::Minor(0)));

        assert_eq!(Key::from_numerical("0A"), None);
        assert_eq!(Key::from_numerical("13A"), None);
        assert_eq!(Key::from_numerical("1C"), None);
        assert_eq!(Key::from_numerical(""), None);
        assert_eq!(Key::from_numerical("A"), None);
    }

    #[test]
    fn test_key_numerical_roundtrip() {
        for i in 0..12 {
            for key in [Key::Major(i), Key::Minor(i)] {
                assert_eq!(Key::from_numerical(&key.numerical()), Some(key));
            }
        }
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("A minor".parse::<Key>().unwrap(), Key::Minor(9));
        assert_eq!("C# major".parse::<Key>().unwrap(), Key::Major(1));
        assert_eq!("F#m".parse::<Key>().unwrap(), Key::Minor(6));
        assert_eq!("G".parse::<Key>().unwrap(), Key::Major(7));
        assert!("Unknown".parse::<Key>().is_err());
        assert!("Db major".parse::<Key>().is_err());
        assert!("A dorian".parse::<Key>().is_err());
    }

    #[test]
    fn test_report_from_estimate() {
        let estimate = KeyEstimate {
            key: Key::Minor(9),
            confidence: 0.87,
            correlation: 0.87,
            degenerate: false,
        };
        let report = KeyReport::from(estimate);
        assert_eq!(report.key, "A minor");
        assert_eq!(report.key_name.as_deref(), Some("A"));
        assert_eq!(report.scale, "minor");
        assert!(!report.is_degraded());
        assert_eq!(report.parsed_key(), Some(Key::Minor(9)));
    }

    #[test]
    fn test_report_json_shape() {
        let report = KeyReport::from(KeyEstimate {
            key: Key::Major(5),
            confidence: 1.0,
            correlation: 1.0,
            degenerate: false,
        });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["key"], "F major");
        assert_eq!(value["keyName"], "F");
        assert_eq!(value["scale"], "major");
        assert_eq!(value["confidence"], 1.0);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_degraded_report_json_shape() {
        let report = KeyReport::degraded("chroma extraction unavailable");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["key"], "Unknown");
        assert_eq!(value["scale"], "unknown");
        assert_eq!(value["confidence"], 0.0);
        assert_eq!(value["error"], "chroma extraction unavailable");
        assert!(value.get("keyName").is_none());
        assert_eq!(report.parsed_key(), None);
    }

    #[test]
    fn test_fallback_estimate() {
        let fallback = KeyEstimate::fallback();
        assert_eq!(fallback.key, Key::Major(0));
        assert_eq!(fallback.confidence, 0.0);
        assert!(fallback.degenerate);
    }
}
