use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// snapshot: ~/shows/2024-spring.yaml
/// format: table
/// color: auto
/// classes: ["WE1", "WE2"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Snapshot file used when `--snapshot` is not given
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default)]
    pub color: Option<ColorMode>,

    /// Only show these classes (all classes when absent)
    #[serde(default)]
    pub classes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colors when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl Config {
    /// Whether `class` should be shown given the `classes` filter.
    pub fn includes_class(&self, class: &str) -> bool {
        match &self.classes {
            Some(classes) => classes.iter().any(|c| c.eq_ignore_ascii_case(class)),
            None => true,
        }
    }
}
