use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::kind::DisciplineKind;

/// A rider/horse combination entered in one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub rider: String,
    pub horse: String,
    pub class: String, // e.g. "WE1"
}

/// One scored test within a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: String,
    pub class: String,
    pub kind: DisciplineKind,

    /// Highest achievable score. Not used for the Speed-Trail.
    #[serde(default)]
    pub max_score: Option<f64>,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub judge: Option<String>,
}

impl Discipline {
    /// Name shown in tables: the configured name, or the kind label.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.label())
    }
}

/// A judge's result for one competitor in one discipline, as stored.
///
/// `value` is points for Dressage and Style-Trail and seconds for the
/// Speed-Trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    pub competitor_id: String,
    pub discipline_id: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub disqualified: bool,
}

impl RawScore {
    pub fn to_score(&self) -> Score {
        if self.disqualified {
            return Score::Disqualified;
        }
        match self.value {
            Some(value) if value.is_finite() => Score::Qualified { value },
            _ => Score::Absent,
        }
    }
}

/// Outcome of one competitor in one discipline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Score {
    Qualified { value: f64 },
    Disqualified,
    /// Did not start. Ranked exactly like a disqualification.
    Absent,
}

impl Score {
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Qualified { value } => Some(*value),
            _ => None,
        }
    }

    /// True for both an explicit DQ and a missing score.
    pub fn is_disqualified(&self) -> bool {
        !matches!(self, Score::Qualified { .. })
    }
}

/// Everything the engine needs, fetched from the record store at one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub disciplines: Vec<Discipline>,
    #[serde(default)]
    pub scores: Vec<RawScore>,
}

impl Snapshot {
    /// Class names in order of first appearance, disciplines first.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        let names = self
            .disciplines
            .iter()
            .map(|d| d.class.as_str())
            .chain(self.competitors.iter().map(|c| c.class.as_str()));
        for name in names {
            if !classes.contains(&name) {
                classes.push(name);
            }
        }
        classes
    }

    pub fn roster(&self, class: &str) -> Vec<&Competitor> {
        self.competitors.iter().filter(|c| c.class == class).collect()
    }

    pub fn disciplines_in(&self, class: &str) -> Vec<&Discipline> {
        self.disciplines.iter().filter(|d| d.class == class).collect()
    }

    pub fn competitor(&self, id: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }

    pub fn discipline(&self, id: &str) -> Option<&Discipline> {
        self.disciplines.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: Option<f64>, disqualified: bool) -> RawScore {
        RawScore {
            competitor_id: "R1".to_string(),
            discipline_id: "dr".to_string(),
            value,
            disqualified,
        }
    }

    fn competitor(id: &str, class: &str) -> Competitor {
        Competitor {
            id: id.to_string(),
            rider: format!("Rider {}", id),
            horse: format!("Horse {}", id),
            class: class.to_string(),
        }
    }

    #[test]
    fn test_raw_score_qualified() {
        assert_eq!(raw(Some(80.0), false).to_score(), Score::Qualified { value: 80.0 });
    }

    #[test]
    fn test_raw_score_disqualified_wins_over_value() {
        assert_eq!(raw(Some(95.0), true).to_score(), Score::Disqualified);
    }

    #[test]
    fn test_raw_score_missing_or_non_finite_is_absent() {
        assert_eq!(raw(None, false).to_score(), Score::Absent);
        assert_eq!(raw(Some(f64::NAN), false).to_score(), Score::Absent);
        assert_eq!(raw(Some(f64::INFINITY), false).to_score(), Score::Absent);
    }

    #[test]
    fn test_absent_counts_as_disqualified() {
        assert!(Score::Absent.is_disqualified());
        assert!(Score::Disqualified.is_disqualified());
        assert!(!Score::Qualified { value: 0.0 }.is_disqualified());
        assert_eq!(Score::Absent.value(), None);
    }

    #[test]
    fn test_snapshot_classes_in_first_appearance_order() {
        let snapshot = Snapshot {
            competitors: vec![competitor("R1", "WE2"), competitor("R2", "WE1")],
            disciplines: vec![Discipline {
                id: "dr".to_string(),
                class: "WE1".to_string(),
                kind: DisciplineKind::Dressage,
                max_score: Some(100.0),
                name: None,
                date: None,
                judge: None,
            }],
            scores: vec![],
        };
        assert_eq!(snapshot.classes(), vec!["WE1", "WE2"]);
        assert_eq!(snapshot.roster("WE2").len(), 1);
        assert_eq!(snapshot.disciplines_in("WE2").len(), 0);
    }

    #[test]
    fn test_parse_snapshot_yaml() {
        let yaml = r#"
competitors:
  - { id: "R1", rider: "Anna", horse: "Bravo", class: "WE1" }
disciplines:
  - id: "dr"
    class: "WE1"
    kind: dressuur
    max_score: 240
    date: "2024-05-12"
scores:
  - { competitor_id: "R1", discipline_id: "dr", value: 180.5 }
  - { competitor_id: "R2", discipline_id: "dr", disqualified: true }
"#;
        let snapshot: Snapshot = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(snapshot.disciplines[0].kind, DisciplineKind::Dressage);
        assert_eq!(snapshot.disciplines[0].display_name(), "Dressage");
        assert_eq!(
            snapshot.disciplines[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 12)
        );
        assert_eq!(snapshot.scores[0].to_score(), Score::Qualified { value: 180.5 });
        assert_eq!(snapshot.scores[1].to_score(), Score::Disqualified);
    }
}
