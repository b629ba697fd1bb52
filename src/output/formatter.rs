use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::config::ColorMode;
use crate::model::{DisciplineKind, Score, Snapshot};
use crate::ranking::{ClassStandings, DisciplineStanding, Placement, RankedDiscipline};

const PLACEMENT_WIDTH: usize = 4;
const VALUE_WIDTH: usize = 8;
const PERCENT_WIDTH: usize = 7;
const POINTS_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

/// Decide whether to emit ANSI colors.
/// `Auto` colors only when stdout is a TTY.
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Raw value as judged: points with one decimal, Speed-Trail times in
/// seconds with two.
pub fn format_value(kind: DisciplineKind, score: &Score) -> String {
    match score {
        Score::Qualified { value } if kind.lower_is_better() => format!("{:.2}s", value),
        Score::Qualified { value } => format!("{:.1}", value),
        Score::Disqualified => "DQ".to_string(),
        Score::Absent => "DNS".to_string(),
    }
}

/// "71.4%", or "-" where no percentage applies
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.1}%", p),
        None => "-".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// "Rider / Horse" for a competitor, falling back to the id
fn entry_name(snapshot: &Snapshot, competitor_id: &str) -> String {
    match snapshot.competitor(competitor_id) {
        Some(c) => format!("{} / {}", c.rider, c.horse),
        None => competitor_id.to_string(),
    }
}

/// Width of the name column: as wide as the longest name, squeezed to the
/// terminal when there is one.
fn name_width(names: &[String], fixed_width: usize, term_width: Option<usize>) -> usize {
    let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    match term_width {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    }
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

fn colored_placement(placement: &Placement, use_colors: bool) -> String {
    let padded = format!("{:>width$}", placement.to_string(), width = PLACEMENT_WIDTH);
    if !use_colors {
        return padded;
    }
    match placement {
        Placement::Disqualified => padded.red().to_string(),
        p if p.is_ex_aequo() => padded.yellow().bold().to_string(),
        _ => padded.bold().to_string(),
    }
}

/// Format one discipline's standing as a table
/// Columns: placement, rider / horse, value, percentage, points
pub fn format_discipline_table(
    ranked: &RankedDiscipline,
    snapshot: &Snapshot,
    use_colors: bool,
) -> String {
    let discipline = &ranked.discipline;
    let title = format!(
        "{} ({}, {})",
        discipline.display_name(),
        discipline.kind,
        discipline.class
    );
    let title = if use_colors {
        title.bold().cyan().to_string()
    } else {
        title
    };

    if ranked.standings.is_empty() {
        return format!("{}\n  No competitors.", title);
    }

    let names: Vec<String> = ranked
        .standings
        .iter()
        .map(|s| entry_name(snapshot, &s.competitor_id))
        .collect();
    let fixed_width =
        PLACEMENT_WIDTH + VALUE_WIDTH + PERCENT_WIDTH + POINTS_WIDTH + SEPARATOR.len() * 4;
    let width = name_width(&names, fixed_width, get_terminal_width());

    let rows = ranked
        .standings
        .iter()
        .zip(&names)
        .map(|(standing, name)| format_discipline_row(discipline.kind, standing, name, width, use_colors))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", title, rows)
}

fn format_discipline_row(
    kind: DisciplineKind,
    standing: &DisciplineStanding,
    name: &str,
    name_width: usize,
    use_colors: bool,
) -> String {
    let name = pad_right(&truncate_name(name, name_width), name_width);
    let value = format!(
        "{:>width$}",
        format_value(kind, &standing.score),
        width = VALUE_WIDTH
    );
    let percentage = format!(
        "{:>width$}",
        format_percentage(standing.percentage),
        width = PERCENT_WIDTH
    );
    let points = format!("{:>width$}", standing.points, width = POINTS_WIDTH);

    let (value, points) = if use_colors && standing.is_disqualified() {
        (value.red().to_string(), points.dimmed().to_string())
    } else {
        (value, points)
    };

    format!(
        "{}{}{}{}{}{}{}{}{}",
        colored_placement(&standing.placement, use_colors),
        SEPARATOR,
        name,
        SEPARATOR,
        value,
        SEPARATOR,
        percentage,
        SEPARATOR,
        points
    )
}

/// Per-discipline cell in the final table: points, "DQ", or "-" when the
/// competitor has no standing in that discipline.
fn discipline_cell(class: &ClassStandings, competitor_id: &str, discipline_id: &str) -> String {
    class
        .classification
        .iter()
        .find(|c| c.competitor_id == competitor_id)
        .and_then(|c| c.entry(discipline_id))
        .map(|e| {
            if e.standing.is_disqualified() {
                "DQ".to_string()
            } else {
                e.standing.points.to_string()
            }
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Format the final classification of a class as a table
/// Columns: placement, rider / horse, points per discipline, total, DQ count
pub fn format_classification_table(
    class: &ClassStandings,
    snapshot: &Snapshot,
    use_colors: bool,
) -> String {
    let title = format!("Class {}", class.class);
    let title = if use_colors {
        title.bold().cyan().to_string()
    } else {
        title
    };

    if class.classification.is_empty() {
        return format!("{}\n  No competitors.", title);
    }

    let names: Vec<String> = class
        .classification
        .iter()
        .map(|c| entry_name(snapshot, &c.competitor_id))
        .collect();
    let fixed_width = PLACEMENT_WIDTH
        + (POINTS_WIDTH + SEPARATOR.len()) * (class.disciplines.len() + 2)
        + SEPARATOR.len();
    let width = name_width(&names, fixed_width, get_terminal_width());

    let mut header = format!(
        "{:>pw$}{}{}",
        "Pl",
        SEPARATOR,
        pad_right("Rider / Horse", width),
        pw = PLACEMENT_WIDTH
    );
    for ranked in &class.disciplines {
        header.push_str(SEPARATOR);
        header.push_str(&format!(
            "{:>w$}",
            ranked.discipline.kind.short_label(),
            w = POINTS_WIDTH
        ));
    }
    header.push_str(&format!(
        "{}{:>w$}{}{:>w$}",
        SEPARATOR,
        "Tot",
        SEPARATOR,
        "DQ",
        w = POINTS_WIDTH
    ));
    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };

    let rows = class
        .classification
        .iter()
        .zip(&names)
        .map(|(result, name)| {
            let mut line = format!(
                "{}{}{}",
                colored_placement(&result.placement, use_colors),
                SEPARATOR,
                pad_right(&truncate_name(name, width), width)
            );
            for ranked in &class.disciplines {
                let cell = discipline_cell(class, &result.competitor_id, &ranked.discipline.id);
                let padded = format!("{:>w$}", cell, w = POINTS_WIDTH);
                line.push_str(SEPARATOR);
                if use_colors && cell == "DQ" {
                    line.push_str(&padded.red().to_string());
                } else {
                    line.push_str(&padded);
                }
            }
            let total = format!("{:>w$}", result.total_points, w = POINTS_WIDTH);
            let total = if use_colors {
                total.bold().to_string()
            } else {
                total
            };
            line.push_str(&format!(
                "{}{}{}{:>w$}",
                SEPARATOR,
                total,
                SEPARATOR,
                result.dq_count,
                w = POINTS_WIDTH
            ));
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}\n{}", title, header, rows)
}

/// Format one discipline as tab-separated values for scripting
/// Columns: placement, rider, horse, value, percentage, points (no headers, no colors)
pub fn format_discipline_tsv(ranked: &RankedDiscipline, snapshot: &Snapshot) -> String {
    ranked
        .standings
        .iter()
        .map(|standing| {
            let (rider, horse) = rider_and_horse(snapshot, &standing.competitor_id);
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                standing.placement,
                rider,
                horse,
                format_value(ranked.discipline.kind, &standing.score),
                format_percentage(standing.percentage),
                standing.points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a final classification as tab-separated values
/// Columns: class, placement, rider, horse, points per discipline, total, dq count
pub fn format_classification_tsv(class: &ClassStandings, snapshot: &Snapshot) -> String {
    class
        .classification
        .iter()
        .map(|result| {
            let (rider, horse) = rider_and_horse(snapshot, &result.competitor_id);
            let mut columns = vec![
                class.class.clone(),
                result.placement.to_string(),
                rider,
                horse,
            ];
            columns.extend(
                class
                    .disciplines
                    .iter()
                    .map(|r| discipline_cell(class, &result.competitor_id, &r.discipline.id)),
            );
            columns.push(result.total_points.to_string());
            columns.push(result.dq_count.to_string());
            columns.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn rider_and_horse(snapshot: &Snapshot, competitor_id: &str) -> (String, String) {
    match snapshot.competitor(competitor_id) {
        Some(c) => (c.rider.clone(), c.horse.clone()),
        None => (competitor_id.to_string(), String::new()),
    }
}
