//! Working Equitation results.
//!
//! Turns judges' raw scores into per-discipline standings (placement and
//! discipline points) and a tie-broken final classification per class.
//! The ranking engine in [`ranking`] is pure: give it a [`model::Snapshot`]
//! and it returns fresh [`ranking::Standings`] every time.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod ranking;
pub mod snapshot;

pub use error::{ConfigurationError, DataIntegrityWarning};
pub use model::{Competitor, Discipline, DisciplineKind, RawScore, Score, Snapshot};
pub use ranking::{compute_class, compute_standings, Standings};
