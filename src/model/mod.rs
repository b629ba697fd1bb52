pub mod kind;
pub mod types;

pub use kind::DisciplineKind;
pub use types::{Competitor, Discipline, RawScore, Score, Snapshot};
