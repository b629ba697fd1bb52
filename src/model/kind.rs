use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigurationError;

/// The three Working Equitation tests a class can be scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum DisciplineKind {
    Dressage,
    StyleTrail,
    SpeedTrail,
}

impl DisciplineKind {
    /// Parse a kind from its code. Case-insensitive; accepts the Dutch names
    /// used on the judging forms as well.
    pub fn parse(s: &str) -> Result<Self, ConfigurationError> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "dressage" | "dressuur" => Ok(DisciplineKind::Dressage),
            "style-trail" | "styletrail" | "stijltrail" | "stijl-trail" => {
                Ok(DisciplineKind::StyleTrail)
            }
            "speed-trail" | "speedtrail" | "speed" | "snelheidstrail" => {
                Ok(DisciplineKind::SpeedTrail)
            }
            _ => Err(ConfigurationError::UnknownDisciplineKind(s.to_string())),
        }
    }

    /// Speed-Trail is timed; the other two are judged against a maximum.
    pub fn has_percentage(&self) -> bool {
        !matches!(self, DisciplineKind::SpeedTrail)
    }

    /// Lower time wins on the Speed-Trail, higher score everywhere else.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, DisciplineKind::SpeedTrail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisciplineKind::Dressage => "Dressage",
            DisciplineKind::StyleTrail => "Style-Trail",
            DisciplineKind::SpeedTrail => "Speed-Trail",
        }
    }

    /// Column header used in the final classification table.
    pub fn short_label(&self) -> &'static str {
        match self {
            DisciplineKind::Dressage => "DR",
            DisciplineKind::StyleTrail => "ST",
            DisciplineKind::SpeedTrail => "SP",
        }
    }
}

impl TryFrom<String> for DisciplineKind {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DisciplineKind::parse(&value)
    }
}

impl fmt::Display for DisciplineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_codes() {
        assert_eq!(DisciplineKind::parse("dressage").unwrap(), DisciplineKind::Dressage);
        assert_eq!(DisciplineKind::parse("style-trail").unwrap(), DisciplineKind::StyleTrail);
        assert_eq!(DisciplineKind::parse("speed-trail").unwrap(), DisciplineKind::SpeedTrail);
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!(DisciplineKind::parse("Dressuur").unwrap(), DisciplineKind::Dressage);
        assert_eq!(DisciplineKind::parse("STYLE_TRAIL").unwrap(), DisciplineKind::StyleTrail);
        assert_eq!(DisciplineKind::parse("Stijltrail").unwrap(), DisciplineKind::StyleTrail);
        assert_eq!(DisciplineKind::parse(" speed trail ").unwrap(), DisciplineKind::SpeedTrail);
    }

    #[test]
    fn test_parse_unknown_kind_rejected() {
        let err = DisciplineKind::parse("cattle").unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownDisciplineKind("cattle".to_string()));
    }

    #[test]
    fn test_direction_and_percentage() {
        assert!(DisciplineKind::Dressage.has_percentage());
        assert!(DisciplineKind::StyleTrail.has_percentage());
        assert!(!DisciplineKind::SpeedTrail.has_percentage());
        assert!(DisciplineKind::SpeedTrail.lower_is_better());
        assert!(!DisciplineKind::Dressage.lower_is_better());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&DisciplineKind::StyleTrail).unwrap();
        assert_eq!(json, "\"style-trail\"");
        let parsed: DisciplineKind = serde_json::from_str("\"Dressuur\"").unwrap();
        assert_eq!(parsed, DisciplineKind::Dressage);
        assert!(serde_json::from_str::<DisciplineKind>("\"cattle\"").is_err());
    }
}
