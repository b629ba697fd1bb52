use serde::Serialize;
use std::collections::HashMap;

use super::placement::{assign_placements, cmp_f64, discipline_points, percentage, Placement};
use crate::model::{Competitor, Discipline, RawScore, Score};

/// One competitor's result within one discipline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineStanding {
    pub competitor_id: String,
    pub score: Score,
    /// `None` for the Speed-Trail.
    pub percentage: Option<f64>,
    pub placement: Placement,
    pub points: u32,
}

impl DisciplineStanding {
    pub fn is_disqualified(&self) -> bool {
        self.score.is_disqualified()
    }
}

/// A discipline together with its computed standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDiscipline {
    pub discipline: Discipline,
    pub standings: Vec<DisciplineStanding>,
}

impl RankedDiscipline {
    pub fn standing_for(&self, competitor_id: &str) -> Option<&DisciplineStanding> {
        self.standings
            .iter()
            .find(|s| s.competitor_id == competitor_id)
    }
}

/// Rank the roster of a class on one discipline.
///
/// Qualified competitors come first, best first, with tied values sharing a
/// placement and its points. Everyone without a qualified score follows in
/// roster order with placement DQ and 0 points. Scores for other disciplines
/// or for competitors outside the roster are ignored; if a competitor has
/// more than one score, the first one counts.
pub fn rank_discipline(
    discipline: &Discipline,
    scores: &[RawScore],
    roster: &[&Competitor],
) -> Vec<DisciplineStanding> {
    if roster.is_empty() {
        return Vec::new();
    }

    let mut by_competitor: HashMap<&str, Score> = HashMap::new();
    for raw in scores.iter().filter(|s| s.discipline_id == discipline.id) {
        by_competitor
            .entry(raw.competitor_id.as_str())
            .or_insert_with(|| raw.to_score());
    }

    let mut qualified: Vec<(&Competitor, f64)> = Vec::new();
    let mut disqualified: Vec<(&Competitor, Score)> = Vec::new();
    for competitor in roster.iter().copied() {
        match by_competitor
            .get(competitor.id.as_str())
            .copied()
            .unwrap_or(Score::Absent)
        {
            Score::Qualified { value } => qualified.push((competitor, value)),
            other => disqualified.push((competitor, other)),
        }
    }

    let lower_is_better = discipline.kind.lower_is_better();
    qualified.sort_by(|a, b| {
        if lower_is_better {
            cmp_f64(a.1, b.1)
        } else {
            cmp_f64(b.1, a.1)
        }
    });

    let placements = assign_placements(&qualified, |a, b| a.1 == b.1);
    let starters = qualified.len();
    let has_percentage = discipline.kind.has_percentage();

    let mut standings = Vec::with_capacity(roster.len());
    for ((competitor, value), placement) in qualified.iter().zip(placements) {
        let points = placement
            .position()
            .map(|position| discipline_points(position, starters))
            .unwrap_or(0);
        standings.push(DisciplineStanding {
            competitor_id: competitor.id.clone(),
            score: Score::Qualified { value: *value },
            percentage: has_percentage.then(|| percentage(*value, discipline.max_score)),
            placement,
            points,
        });
    }

    for (competitor, score) in disqualified {
        standings.push(DisciplineStanding {
            competitor_id: competitor.id.clone(),
            score,
            percentage: has_percentage.then_some(0.0),
            placement: Placement::Disqualified,
            points: 0,
        });
    }

    tracing::debug!(
        discipline = %discipline.id,
        kind = %discipline.kind,
        starters,
        disqualified = standings.len() - starters,
        "ranked discipline"
    );

    standings
}
