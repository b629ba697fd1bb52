use std::fmt;

/// A snapshot the engine refuses to rank.
///
/// These are caught before any ranking happens; `validate_snapshot` reports
/// every one it finds rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown discipline kind '{0}' (expected dressage, style-trail or speed-trail)")]
    UnknownDisciplineKind(String),

    #[error("competitor id '{0}' is used more than once")]
    DuplicateCompetitor(String),

    #[error("discipline id '{0}' is used more than once")]
    DuplicateDiscipline(String),

    #[error("class '{class}' has more than one {kind} discipline ('{first}' and '{second}')")]
    DuplicateKindInClass {
        class: String,
        kind: String,
        first: String,
        second: String,
    },

    #[error("discipline '{discipline}' has an invalid max score {max_score}")]
    InvalidMaxScore { discipline: String, max_score: f64 },

    #[error("discipline '{0}' does not belong to a class")]
    MissingClass(String),
}

/// Something odd in the score data that does not stop the computation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// Same competitor scored twice in one discipline. The first score is kept.
    DuplicateScore {
        competitor_id: String,
        discipline_id: String,
    },
    UnknownCompetitor {
        competitor_id: String,
        discipline_id: String,
    },
    UnknownDiscipline {
        competitor_id: String,
        discipline_id: String,
    },
    /// Score for a competitor registered in another class than the discipline.
    OutsideClass {
        competitor_id: String,
        discipline_id: String,
    },
    /// Value is NaN or infinite; the score counts as absent.
    NonFiniteValue {
        competitor_id: String,
        discipline_id: String,
    },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIntegrityWarning::DuplicateScore {
                competitor_id,
                discipline_id,
            } => write!(
                f,
                "duplicate score for competitor '{}' in discipline '{}', keeping the first",
                competitor_id, discipline_id
            ),
            DataIntegrityWarning::UnknownCompetitor {
                competitor_id,
                discipline_id,
            } => write!(
                f,
                "score in discipline '{}' references unknown competitor '{}', ignored",
                discipline_id, competitor_id
            ),
            DataIntegrityWarning::UnknownDiscipline {
                competitor_id,
                discipline_id,
            } => write!(
                f,
                "score for competitor '{}' references unknown discipline '{}', ignored",
                competitor_id, discipline_id
            ),
            DataIntegrityWarning::OutsideClass {
                competitor_id,
                discipline_id,
            } => write!(
                f,
                "competitor '{}' is not registered in the class of discipline '{}', score ignored",
                competitor_id, discipline_id
            ),
            DataIntegrityWarning::NonFiniteValue {
                competitor_id,
                discipline_id,
            } => write!(
                f,
                "non-finite value for competitor '{}' in discipline '{}', treated as absent",
                competitor_id, discipline_id
            ),
        }
    }
}
