use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::Path;

use crate::model::Snapshot;
use crate::ranking::Standings;

/// Load a record-store export.
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        anyhow::bail!("Snapshot file not found at {}", path.display());
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let snapshot: Snapshot = if is_json {
        let file = File::open(path)
            .with_context(|| format!("Failed to open snapshot file at {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse snapshot: invalid JSON in {}", path.display()))?
    } else {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file at {}", path.display()))?;
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: invalid YAML in {}", path.display()))?
    };

    tracing::info!(
        path = %path.display(),
        competitors = snapshot.competitors.len(),
        disciplines = snapshot.disciplines.len(),
        scores = snapshot.scores.len(),
        "loaded snapshot"
    );

    Ok(snapshot)
}

/// Save computed standings as pretty JSON, atomically
///
/// Uses atomic-write-file so a reader never sees a half-written export.
pub fn save_standings(path: &Path, standings: &Standings) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, standings).context("Failed to serialize standings")?;

    file.commit()
        .with_context(|| format!("Failed to save standings to {}", path.display()))?;

    tracing::info!(path = %path.display(), classes = standings.classes.len(), "exported standings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisciplineKind;
    use crate::ranking::compute_standings;
    use std::env;

    const SNAPSHOT_YAML: &str = r#"
competitors:
  - { id: "R1", rider: "Anna", horse: "Bravo", class: "WE1" }
  - { id: "R2", rider: "Bart", horse: "Cisco", class: "WE1" }
disciplines:
  - { id: "dr", class: "WE1", kind: dressage, max_score: 100 }
  - { id: "sp", class: "WE1", kind: speed-trail }
scores:
  - { competitor_id: "R1", discipline_id: "dr", value: 71.5 }
  - { competitor_id: "R2", discipline_id: "dr", value: 68 }
  - { competitor_id: "R1", discipline_id: "sp", value: 82.3 }
  - { competitor_id: "R2", discipline_id: "sp", disqualified: true }
"#;

    #[test]
    fn test_load_missing_file_is_error() {
        let temp_path = env::temp_dir().join("we_standings_test_missing_snapshot.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_snapshot(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Snapshot file not found"));
    }

    #[test]
    fn test_load_yaml_snapshot() {
        let temp_path = env::temp_dir().join("we_standings_test_snapshot.yaml");
        fs::write(&temp_path, SNAPSHOT_YAML).unwrap();

        let snapshot = load_snapshot(&temp_path).unwrap();
        assert_eq!(snapshot.competitors.len(), 2);
        assert_eq!(snapshot.disciplines[1].kind, DisciplineKind::SpeedTrail);
        assert_eq!(snapshot.scores.len(), 4);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_json_snapshot() {
        let temp_path = env::temp_dir().join("we_standings_test_snapshot.json");
        let yaml_snapshot: Snapshot = serde_saphyr::from_str(SNAPSHOT_YAML).unwrap();
        fs::write(&temp_path, serde_json::to_string(&yaml_snapshot).unwrap()).unwrap();

        let snapshot = load_snapshot(&temp_path).unwrap();
        assert_eq!(snapshot, yaml_snapshot);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_save_standings_writes_json() {
        let temp_path = env::temp_dir().join("we_standings_test_export.json");
        let _ = fs::remove_file(&temp_path);

        let snapshot: Snapshot = serde_saphyr::from_str(SNAPSHOT_YAML).unwrap();
        let standings = compute_standings(&snapshot);
        save_standings(&temp_path, &standings).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&temp_path).unwrap()).unwrap();
        let classification = &written["classes"][0]["classification"];
        assert_eq!(classification[0]["competitor_id"], "R1");
        assert_eq!(classification[0]["placement"], "1");
        assert_eq!(classification[1]["dq_count"], 1);

        let _ = fs::remove_file(&temp_path);
    }
}
