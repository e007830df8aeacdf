use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Investor risk profile. Biases retrieval toward passages that match the
/// profile's vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

/// Returned by strict parsing of an unknown profile tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk profile '{0}' (expected conservative, balanced or aggressive)")]
pub struct ProfileParseError(pub String);

impl RiskProfile {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    /// Label shown to French-speaking users of the advice form.
    #[must_use]
    pub const fn source_label(self) -> &'static str {
        match self {
            Self::Conservative => "Prudent",
            Self::Balanced => "Équilibré",
            Self::Aggressive => "Audacieux",
        }
    }

    /// Names that identify the profile inside free-text queries, in both
    /// languages.
    #[must_use]
    pub const fn query_names(self) -> &'static [&'static str] {
        match self {
            Self::Conservative => &["prudent", "conservative"],
            Self::Balanced => &["équilibré", "balanced"],
            Self::Aggressive => &["audacieux", "aggressive"],
        }
    }

    /// Lenient conversion used at the engine boundary: absent or unknown tags
    /// map to [`RiskProfile::Balanced`].
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(raw) => raw.parse().unwrap_or_else(|err: ProfileParseError| {
                tracing::debug!("{err}; defaulting to balanced");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

impl FromStr for RiskProfile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" | "prudent" | "conservateur" => Ok(Self::Conservative),
            "balanced" | "équilibré" | "equilibre" | "moderate" | "modéré" => Ok(Self::Balanced),
            "aggressive" | "audacieux" | "agressif" | "dynamique" => Ok(Self::Aggressive),
            _ => Err(ProfileParseError(s.to_string())),
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_languages_case_insensitively() {
        assert_eq!("Prudent".parse(), Ok(RiskProfile::Conservative));
        assert_eq!("CONSERVATIVE".parse(), Ok(RiskProfile::Conservative));
        assert_eq!("Équilibré".parse(), Ok(RiskProfile::Balanced));
        assert_eq!(" balanced ".parse(), Ok(RiskProfile::Balanced));
        assert_eq!("Audacieux".parse(), Ok(RiskProfile::Aggressive));
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "yolo".parse::<RiskProfile>().expect_err("unknown tag");
        assert!(err.to_string().contains("yolo"));
    }

    #[test]
    fn lenient_tag_defaults_to_balanced() {
        assert_eq!(RiskProfile::from_tag(None), RiskProfile::Balanced);
        assert_eq!(RiskProfile::from_tag(Some("")), RiskProfile::Balanced);
        assert_eq!(RiskProfile::from_tag(Some("yolo")), RiskProfile::Balanced);
        assert_eq!(
            RiskProfile::from_tag(Some("Audacieux")),
            RiskProfile::Aggressive
        );
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for profile in RiskProfile::ALL {
            assert_eq!(profile.as_str().parse(), Ok(profile));
            assert_eq!(profile.source_label().parse(), Ok(profile));
            assert_eq!(profile.to_string(), profile.as_str());
        }
    }
}
