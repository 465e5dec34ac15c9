use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a filing status code is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised filing status '{0}' (expected one of S, MFJ, MFS, HOH)")]
pub struct FilingStatusParseError(pub String);

/// Taxpayer category selecting the bracket table, standard deduction and
/// LTCG thresholds for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[
            FilingStatus::Single,
            FilingStatus::MarriedFilingJointly,
            FilingStatus::MarriedFilingSeparately,
            FilingStatus::HeadOfHousehold,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Parses a status code. Accepts the short codes (`S`, `MFJ`, `MFS`,
    /// `HOH`) and the camelCase names, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "single" => Some(Self::Single),
            "mfj" | "marriedfilingjointly" => Some(Self::MarriedFilingJointly),
            "mfs" | "marriedfilingseparately" => Some(Self::MarriedFilingSeparately),
            "hoh" | "headofhousehold" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }
}

impl FromStr for FilingStatus {
    type Err = FilingStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FilingStatusParseError(s.to_string()))
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_short_codes() {
        assert_eq!(FilingStatus::parse("S"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::parse("MFJ"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse("MFS"),
            Some(FilingStatus::MarriedFilingSeparately)
        );
        assert_eq!(FilingStatus::parse("HOH"), Some(FilingStatus::HeadOfHousehold));
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_names() {
        assert_eq!(FilingStatus::parse(" hoh "), Some(FilingStatus::HeadOfHousehold));
        assert_eq!(
            FilingStatus::parse("marriedFilingJointly"),
            Some(FilingStatus::MarriedFilingJointly)
        );
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(FilingStatus::parse("QSS"), None);
        assert_eq!(
            "X".parse::<FilingStatus>(),
            Err(FilingStatusParseError("X".to_string()))
        );
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in FilingStatus::all() {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(*status));
        }
    }
}
