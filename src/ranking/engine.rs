use serde::Serialize;

use super::classification::{aggregate, FinalClassification};
use super::discipline::{rank_discipline, RankedDiscipline};
use super::validation::scan_integrity;
use crate::error::DataIntegrityWarning;
use crate::model::Snapshot;

/// Results for one class: every discipline's standing plus the final
/// classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStandings {
    pub class: String,
    pub disciplines: Vec<RankedDiscipline>,
    pub classification: Vec<FinalClassification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Standings {
    pub classes: Vec<ClassStandings>,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Standings {
    pub fn class(&self, name: &str) -> Option<&ClassStandings> {
        self.classes.iter().find(|c| c.class == name)
    }

    pub fn discipline(&self, id: &str) -> Option<&RankedDiscipline> {
        self.classes
            .iter()
            .flat_map(|c| c.disciplines.iter())
            .find(|d| d.discipline.id == id)
    }
}

/// Compute standings for every class in the snapshot.
///
/// Always recomputes from scratch. Suspicious score records are reported in
/// `warnings` and logged; they never abort the computation.
pub fn compute_standings(snapshot: &Snapshot) -> Standings {
    let warnings = scan_integrity(snapshot);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let classes = snapshot
        .classes()
        .into_iter()
        .map(|class| rank_class(snapshot, class))
        .collect();

    Standings { classes, warnings }
}

/// Compute standings for a single class. `None` if nothing in the snapshot
/// belongs to that class.
pub fn compute_class(snapshot: &Snapshot, class: &str) -> Option<ClassStandings> {
    if !snapshot.classes().contains(&class) {
        return None;
    }
    Some(rank_class(snapshot, class))
}

fn rank_class(snapshot: &Snapshot, class: &str) -> ClassStandings {
    let roster = snapshot.roster(class);

    let disciplines: Vec<RankedDiscipline> = snapshot
        .disciplines_in(class)
        .into_iter()
        .map(|discipline| RankedDiscipline {
            standings: rank_discipline(discipline, &snapshot.scores, &roster),
            discipline: discipline.clone(),
        })
        .collect();

    let classification = aggregate(&disciplines, &roster);

    tracing::debug!(
        class,
        competitors = roster.len(),
        disciplines = disciplines.len(),
        "computed class standings"
    );

    ClassStandings {
        class: class.to_string(),
        disciplines,
        classification,
    }
}
