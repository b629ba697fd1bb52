use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use we_standings::config::{load_config, OutputFormat};
use we_standings::output::{
    format_classification_table, format_classification_tsv, format_discipline_table,
    format_discipline_tsv, should_use_colors,
};
use we_standings::ranking::{
    compute_class, compute_standings, scan_integrity, validate_snapshot, ClassStandings,
};
use we_standings::snapshot::{load_snapshot, save_standings};
use we_standings::{ConfigurationError, Snapshot};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Final classification per class (default if no subcommand)
    Final {
        /// Only this class (e.g. WE1)
        class: Option<String>,
    },
    /// Standing of a single discipline
    Discipline {
        /// Discipline id as used in the snapshot
        id: String,
    },
    /// Write all standings to a JSON file
    Export {
        /// Output path
        out: PathBuf,
    },
    /// Validate the snapshot and list data problems without ranking
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "we-standings")]
#[command(about = "Working Equitation standings and final classification", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/we-standings/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Snapshot exported from the record store (.yaml or .json)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Final { class: None });

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let snapshot_path = match cli.snapshot.or_else(|| config.snapshot.clone()) {
        Some(path) => path,
        None => {
            eprintln!("No snapshot given. Pass --snapshot <FILE> or set it in the config file:");
            eprintln!("  snapshot: /path/to/show.yaml");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let snapshot = match load_snapshot(&snapshot_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Snapshot error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let validation = validate_snapshot(&snapshot);

    if let Commands::Check = command {
        let code = run_check(&snapshot, validation.as_ref().err());
        std::process::exit(code);
    }

    // Refuse to rank a misconfigured competition
    if let Err(errors) = validation {
        print_configuration_errors(&errors);
        std::process::exit(EXIT_CONFIG);
    }

    let format = cli.format.or(config.format).unwrap_or_default();
    let use_colors = should_use_colors(config.color.unwrap_or_default());

    match command {
        Commands::Final { class: Some(class) } => {
            for warning in scan_integrity(&snapshot) {
                tracing::warn!("{}", warning);
            }
            let Some(standings) = compute_class(&snapshot, &class) else {
                eprintln!("Unknown class '{}'.", class);
                std::process::exit(EXIT_DATA);
            };
            print_classes(&[&standings], &snapshot, format, use_colors);
        }
        Commands::Final { class: None } => {
            let standings = compute_standings(&snapshot);
            let classes: Vec<&ClassStandings> = standings
                .classes
                .iter()
                .filter(|c| config.includes_class(&c.class))
                .collect();
            print_classes(&classes, &snapshot, format, use_colors);
        }
        Commands::Discipline { id } => {
            let standings = compute_standings(&snapshot);
            let Some(ranked) = standings.discipline(&id) else {
                eprintln!("Unknown discipline '{}'.", id);
                std::process::exit(EXIT_DATA);
            };
            match format {
                OutputFormat::Table => {
                    println!("{}", format_discipline_table(ranked, &snapshot, use_colors))
                }
                OutputFormat::Tsv => println!("{}", format_discipline_tsv(ranked, &snapshot)),
                OutputFormat::Json => print_json(ranked),
            }
        }
        Commands::Export { out } => {
            let standings = compute_standings(&snapshot);
            if let Err(e) = save_standings(&out, &standings) {
                eprintln!("Export failed: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
            println!(
                "Exported standings for {} classes to {}",
                standings.classes.len(),
                out.display()
            );
        }
        Commands::Check => unreachable!("handled before ranking"),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_classes(
    classes: &[&ClassStandings],
    snapshot: &Snapshot,
    format: OutputFormat,
    use_colors: bool,
) {
    if classes.is_empty() {
        println!("No classes found.");
        return;
    }

    match format {
        OutputFormat::Table => {
            let output = classes
                .iter()
                .map(|c| format_classification_table(c, snapshot, use_colors))
                .collect::<Vec<_>>()
                .join("\n\n");
            println!("{}", output);
        }
        OutputFormat::Tsv => {
            for class in classes {
                println!("{}", format_classification_tsv(class, snapshot));
            }
        }
        OutputFormat::Json => print_json(&classes),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

fn print_configuration_errors(errors: &[ConfigurationError]) {
    eprintln!("Snapshot configuration errors:");
    for error in errors {
        eprintln!("  - {}", error);
    }
}

/// Print validation results. Returns the exit code.
fn run_check(snapshot: &Snapshot, errors: Option<&Vec<ConfigurationError>>) -> i32 {
    let warnings = scan_integrity(snapshot);

    println!(
        "{} competitors, {} disciplines, {} scores in {} classes",
        snapshot.competitors.len(),
        snapshot.disciplines.len(),
        snapshot.scores.len(),
        snapshot.classes().len()
    );

    if let Some(errors) = errors {
        print_configuration_errors(errors);
    }

    if !warnings.is_empty() {
        println!("Data warnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    if errors.is_some() {
        EXIT_CONFIG
    } else {
        if warnings.is_empty() {
            println!("Snapshot OK.");
        }
        EXIT_SUCCESS
    }
}
