use std::collections::{HashMap, HashSet};

use crate::error::{ConfigurationError, DataIntegrityWarning};
use crate::model::{Competitor, Discipline, DisciplineKind, Snapshot};

/// Validate the snapshot's configuration before ranking.
/// Returns all validation errors at once (not just the first).
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), Vec<ConfigurationError>> {
    let mut errors = Vec::new();

    let mut competitor_ids = HashSet::new();
    for competitor in &snapshot.competitors {
        if !competitor_ids.insert(competitor.id.as_str()) {
            errors.push(ConfigurationError::DuplicateCompetitor(competitor.id.clone()));
        }
    }

    let mut discipline_ids = HashSet::new();
    let mut kinds_in_class: HashMap<(&str, DisciplineKind), &str> = HashMap::new();
    for discipline in &snapshot.disciplines {
        if !discipline_ids.insert(discipline.id.as_str()) {
            errors.push(ConfigurationError::DuplicateDiscipline(discipline.id.clone()));
        }

        if discipline.class.trim().is_empty() {
            errors.push(ConfigurationError::MissingClass(discipline.id.clone()));
        }

        if let Some(max_score) = discipline.max_score {
            if !max_score.is_finite() || max_score < 0.0 {
                errors.push(ConfigurationError::InvalidMaxScore {
                    discipline: discipline.id.clone(),
                    max_score,
                });
            }
        }

        // The tie-break cascade reads one discipline per kind
        let key = (discipline.class.as_str(), discipline.kind);
        if let Some(first) = kinds_in_class.get(&key) {
            errors.push(ConfigurationError::DuplicateKindInClass {
                class: discipline.class.clone(),
                kind: discipline.kind.label().to_string(),
                first: first.to_string(),
                second: discipline.id.clone(),
            });
        } else {
            kinds_in_class.insert(key, discipline.id.as_str());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Find score records the engine will skip or reinterpret.
///
/// Warnings come out in score order. None of them stop the computation.
pub fn scan_integrity(snapshot: &Snapshot) -> Vec<DataIntegrityWarning> {
    let competitors: HashMap<&str, &Competitor> = snapshot
        .competitors
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();
    let disciplines: HashMap<&str, &Discipline> = snapshot
        .disciplines
        .iter()
        .map(|d| (d.id.as_str(), d))
        .collect();

    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for score in &snapshot.scores {
        let competitor_id = score.competitor_id.clone();
        let discipline_id = score.discipline_id.clone();

        let Some(discipline) = disciplines.get(score.discipline_id.as_str()) else {
            warnings.push(DataIntegrityWarning::UnknownDiscipline {
                competitor_id,
                discipline_id,
            });
            continue;
        };
        let Some(competitor) = competitors.get(score.competitor_id.as_str()) else {
            warnings.push(DataIntegrityWarning::UnknownCompetitor {
                competitor_id,
                discipline_id,
            });
            continue;
        };
        if competitor.class != discipline.class {
            warnings.push(DataIntegrityWarning::OutsideClass {
                competitor_id,
                discipline_id,
            });
            continue;
        }
        if !seen.insert((score.competitor_id.as_str(), score.discipline_id.as_str())) {
            warnings.push(DataIntegrityWarning::DuplicateScore {
                competitor_id,
                discipline_id,
            });
            continue;
        }
        if !score.disqualified && score.value.is_some_and(|v| !v.is_finite()) {
            warnings.push(DataIntegrityWarning::NonFiniteValue {
                competitor_id,
                discipline_id,
            });
        }
    }

    warnings
}
