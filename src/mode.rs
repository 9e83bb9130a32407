use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Survey delivery mode, derived from the origin file name.
///
/// Detection is an ordered keyword scan over the case-folded origin; the
/// first matching keyword wins, so an origin containing both "distance" and
/// "dtl" classifies as [`Mode::Distance`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Mode {
    Distance,
    Dtl,
    Online,
    Unknown,
}

const MODE_KEYWORDS: &[(&str, Mode)] = &[
    ("distance", Mode::Distance),
    ("dtl", Mode::Dtl),
    ("online", Mode::Online),
];

impl Mode {
    /// Classifies an origin identifier. Total: every input maps to a mode.
    pub fn detect(origin: &str) -> Mode {
        let folded = origin.to_lowercase();
        MODE_KEYWORDS
            .iter()
            .find(|(keyword, _)| folded.contains(keyword))
            .map(|(_, mode)| *mode)
            .unwrap_or(Mode::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Distance => "Distance",
            Mode::Dtl => "DTL",
            Mode::Online => "Online",
            Mode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_keywords_case_insensitively() {
        assert_eq!(Mode::detect("B.Ed_Distance_2024.csv"), Mode::Distance);
        assert_eq!(Mode::detect("feedback-DTL-jan.xlsx"), Mode::Dtl);
        assert_eq!(Mode::detect("ONLINE_mca.csv"), Mode::Online);
        assert_eq!(Mode::detect("legacy_batch.csv"), Mode::Unknown);
    }

    #[test]
    fn detect_prefers_earlier_keywords_on_overlap() {
        assert_eq!(Mode::detect("distance_dtl_online.csv"), Mode::Distance);
        assert_eq!(Mode::detect("dtl_online.csv"), Mode::Dtl);
    }

    #[test]
    fn labels_round_trip_through_display() {
        assert_eq!(Mode::Dtl.to_string(), "DTL");
        assert_eq!(Mode::Unknown.to_string(), "Unknown");
    }
}
