pub mod formatter;

pub use formatter::{
    format_classification_table, format_classification_tsv, format_discipline_table,
    format_discipline_tsv, format_percentage, format_value, should_use_colors,
};
