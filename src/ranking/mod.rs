pub mod classification;
pub mod discipline;
pub mod engine;
pub mod placement;
pub mod validation;

pub use classification::{aggregate, ClassificationEntry, FinalClassification, TieBreak};
pub use discipline::{rank_discipline, DisciplineStanding, RankedDiscipline};
pub use engine::{compute_class, compute_standings, ClassStandings, Standings};
pub use placement::{assign_placements, discipline_points, Placement};
pub use validation::{scan_integrity, validate_snapshot};
