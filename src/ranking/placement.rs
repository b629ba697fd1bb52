use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Where a competitor finished.
///
/// Positions use competition ranking: a group of `k` tied competitors shares
/// the position of its first member and the next group starts `k` further on
/// (1, 1, 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Ranked { position: u32, ex_aequo: bool },
    Disqualified,
}

impl Placement {
    pub fn position(&self) -> Option<u32> {
        match self {
            Placement::Ranked { position, .. } => Some(*position),
            Placement::Disqualified => None,
        }
    }

    pub fn is_ex_aequo(&self) -> bool {
        matches!(self, Placement::Ranked { ex_aequo: true, .. })
    }
}

/// "1", "1*" for a shared place, "DQ".
impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Ranked {
                position,
                ex_aequo: false,
            } => write!(f, "{}", position),
            Placement::Ranked {
                position,
                ex_aequo: true,
            } => write!(f, "{}*", position),
            Placement::Disqualified => f.write_str("DQ"),
        }
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Assign placements to an already sorted list.
///
/// `same` decides whether two neighbours are tied. Ties are only looked for
/// between consecutive items, so the list must be sorted on the same key.
pub fn assign_placements<T, F>(sorted: &[T], same: F) -> Vec<Placement>
where
    F: Fn(&T, &T) -> bool,
{
    let mut placements = Vec::with_capacity(sorted.len());
    let mut start = 0;

    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && same(&sorted[start], &sorted[end]) {
            end += 1;
        }

        let group_size = end - start;
        let placement = Placement::Ranked {
            position: (start + 1) as u32,
            ex_aequo: group_size > 1,
        };
        placements.extend(std::iter::repeat(placement).take(group_size));

        start = end;
    }

    placements
}

/// Points for finishing at `position` among `qualified` starters.
///
/// The winner gets one bonus point (`qualified + 1`); after that every place
/// is worth one point less than the place above it.
pub fn discipline_points(position: u32, qualified: usize) -> u32 {
    let qualified = qualified as u32;
    if position == 1 {
        qualified + 1
    } else {
        qualified.saturating_sub(position - 1)
    }
}

/// Percentage of the maximum, rounded to one decimal. Zero when no usable
/// maximum is configured.
pub fn percentage(value: f64, max_score: Option<f64>) -> f64 {
    match max_score {
        Some(max) if max > 0.0 && max.is_finite() => round_to_tenth(value / max * 100.0),
        _ => 0.0,
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Ordering for values the engine has already checked to be finite.
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(placements: &[Placement]) -> Vec<String> {
        placements.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_assign_placements_no_ties() {
        let values = [90, 80, 70];
        let placements = assign_placements(&values, |a, b| a == b);
        assert_eq!(labels(&placements), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_assign_placements_skips_after_tie() {
        let values = [80, 80, 60];
        let placements = assign_placements(&values, |a, b| a == b);
        assert_eq!(labels(&placements), vec!["1*", "1*", "3"]);
    }

    #[test]
    fn test_assign_placements_tie_in_middle_and_end() {
        let values = [9, 7, 7, 7, 5, 3, 3];
        let placements = assign_placements(&values, |a, b| a == b);
        assert_eq!(labels(&placements), vec!["1", "2*", "2*", "2*", "5", "6*", "6*"]);
    }

    #[test]
    fn test_assign_placements_empty() {
        let values: [i32; 0] = [];
        assert!(assign_placements(&values, |a, b| a == b).is_empty());
    }

    #[test]
    fn test_discipline_points_four_starters() {
        let points: Vec<u32> = (1..=4).map(|p| discipline_points(p, 4)).collect();
        assert_eq!(points, vec![5, 3, 2, 1]);
    }

    #[test]
    fn test_discipline_points_single_starter() {
        assert_eq!(discipline_points(1, 1), 2);
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(80.0, Some(100.0)), 80.0);
        assert_eq!(percentage(2.0, Some(3.0)), 66.7);
        assert_eq!(percentage(171.25, Some(240.0)), 71.4);
    }

    #[test]
    fn test_percentage_without_max_is_zero() {
        assert_eq!(percentage(80.0, None), 0.0);
        assert_eq!(percentage(80.0, Some(0.0)), 0.0);
    }

    #[test]
    fn test_placement_accessors() {
        let shared = Placement::Ranked { position: 2, ex_aequo: true };
        assert_eq!(shared.position(), Some(2));
        assert!(shared.is_ex_aequo());
        assert_eq!(Placement::Disqualified.position(), None);
        assert!(!Placement::Disqualified.is_ex_aequo());
    }

    #[test]
    fn test_placement_serializes_as_label() {
        let json = serde_json::to_string(&Placement::Ranked { position: 1, ex_aequo: true }).unwrap();
        assert_eq!(json, "\"1*\"");
        assert_eq!(serde_json::to_string(&Placement::Disqualified).unwrap(), "\"DQ\"");
    }
}
