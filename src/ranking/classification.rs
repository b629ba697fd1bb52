use serde::Serialize;
use std::cmp::Ordering;

use super::discipline::{DisciplineStanding, RankedDiscipline};
use super::placement::{assign_placements, cmp_f64, Placement};
use crate::model::{Competitor, DisciplineKind};

/// A competitor's standing in one of the class's disciplines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationEntry {
    pub discipline_id: String,
    pub kind: DisciplineKind,
    pub standing: DisciplineStanding,
}

/// The values the final classification is sorted on, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TieBreak {
    pub dq_count: u32,
    pub total_points: u32,
    pub dressage_pct: f64,
    pub style_trail_pct: f64,
    /// `None` when there is no Speed-Trail time (DQ, absent, or not run in
    /// this class); sorts as slower than any time.
    pub speed_trail_time: Option<f64>,
}

impl TieBreak {
    /// Better competitors order first.
    pub fn compare(&self, other: &TieBreak) -> Ordering {
        self.dq_count
            .cmp(&other.dq_count)
            .then_with(|| other.total_points.cmp(&self.total_points))
            .then_with(|| cmp_f64(other.dressage_pct, self.dressage_pct))
            .then_with(|| cmp_f64(other.style_trail_pct, self.style_trail_pct))
            .then_with(|| cmp_f64(self.speed_time_or_inf(), other.speed_time_or_inf()))
    }

    fn speed_time_or_inf(&self) -> f64 {
        self.speed_trail_time.unwrap_or(f64::INFINITY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalClassification {
    pub competitor_id: String,
    pub entries: Vec<ClassificationEntry>,
    pub total_points: u32,
    pub dq_count: u32,
    pub tiebreak: TieBreak,
    pub placement: Placement,
}

impl FinalClassification {
    pub fn entry(&self, discipline_id: &str) -> Option<&ClassificationEntry> {
        self.entries.iter().find(|e| e.discipline_id == discipline_id)
    }
}

/// Combine the standings of every discipline of a class into the final
/// classification.
///
/// Points are summed over the disciplines in which the competitor has a
/// standing; each DQ or absence counts once. Ties on the full cascade
/// (DQ count, total points, Dressage %, Style-Trail %, Speed-Trail time) share
/// a placement. When a class has several disciplines of one kind, the first
/// one is used for the cascade.
pub fn aggregate(
    disciplines: &[RankedDiscipline],
    roster: &[&Competitor],
) -> Vec<FinalClassification> {
    if roster.is_empty() {
        return Vec::new();
    }

    let first_of = |kind: DisciplineKind| disciplines.iter().find(|d| d.discipline.kind == kind);
    let dressage = first_of(DisciplineKind::Dressage);
    let style_trail = first_of(DisciplineKind::StyleTrail);
    let speed_trail = first_of(DisciplineKind::SpeedTrail);

    let mut rows: Vec<(&Competitor, Vec<ClassificationEntry>, TieBreak)> = roster
        .iter()
        .copied()
        .map(|competitor| {
            let entries: Vec<ClassificationEntry> = disciplines
                .iter()
                .filter_map(|ranked| {
                    ranked
                        .standing_for(&competitor.id)
                        .map(|standing| ClassificationEntry {
                            discipline_id: ranked.discipline.id.clone(),
                            kind: ranked.discipline.kind,
                            standing: standing.clone(),
                        })
                })
                .collect();

            let percentage_in = |ranked: Option<&RankedDiscipline>| {
                ranked
                    .and_then(|r| r.standing_for(&competitor.id))
                    .and_then(|s| s.percentage)
                    .unwrap_or(0.0)
            };

            let tiebreak = TieBreak {
                dq_count: entries.iter().filter(|e| e.standing.is_disqualified()).count() as u32,
                total_points: entries.iter().map(|e| e.standing.points).sum(),
                dressage_pct: percentage_in(dressage),
                style_trail_pct: percentage_in(style_trail),
                speed_trail_time: speed_trail
                    .and_then(|r| r.standing_for(&competitor.id))
                    .and_then(|s| s.score.value()),
            };

            (competitor, entries, tiebreak)
        })
        .collect();

    rows.sort_by(|a, b| a.2.compare(&b.2));

    let placements = assign_placements(&rows, |a, b| a.2 == b.2);

    let classification: Vec<FinalClassification> = rows
        .into_iter()
        .zip(placements)
        .map(|((competitor, entries, tiebreak), placement)| FinalClassification {
            competitor_id: competitor.id.clone(),
            entries,
            total_points: tiebreak.total_points,
            dq_count: tiebreak.dq_count,
            tiebreak,
            placement,
        })
        .collect();

    tracing::debug!(
        competitors = classification.len(),
        disciplines = disciplines.len(),
        "aggregated final classification"
    );

    classification
}
