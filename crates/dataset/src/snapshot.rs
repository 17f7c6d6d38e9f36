use crate::error::DatasetError;
use crate::repository::Dataset;
use core_types::{Observation, RawObservation};
use serde_json::Value;
use std::path::Path;

/// Reads the published snapshot and builds the read-only dataset.
///
/// This is the only suspension point of a dashboard session; everything
/// downstream of it runs synchronously on the loaded data.
pub async fn load_snapshot(path: &Path) -> Result<Dataset, DatasetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let dataset = parse_snapshot(&text)?;
    tracing::info!(
        path = %path.display(),
        observations = dataset.len(),
        "Loaded observation snapshot."
    );
    Ok(dataset)
}

/// Parses snapshot JSON. Records that cannot be turned into an observation
/// are skipped with a warning instead of failing the load.
pub fn parse_snapshot(text: &str) -> Result<Dataset, DatasetError> {
    let records = match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => records,
        _ => return Err(DatasetError::NotAnArray),
    };

    let total = records.len();
    let observations: Vec<Observation> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let parsed = serde_json::from_value::<RawObservation>(record)
                .map_err(|e| e.to_string())
                .and_then(|raw| Observation::try_from(raw).map_err(|e| e.to_string()));
            match parsed {
                Ok(observation) => Some(observation),
                Err(reason) => {
                    tracing::warn!(index, %reason, "Skipping unusable snapshot record.");
                    None
                }
            }
        })
        .collect();

    if observations.len() < total {
        tracing::warn!(
            skipped = total - observations.len(),
            total,
            "Some snapshot records were skipped."
        );
    }

    Ok(Dataset::new(observations))
}

/// Writes observations in the snapshot format.
pub async fn write_snapshot(path: &Path, observations: &[Observation]) -> Result<(), DatasetError> {
    let bytes = serde_json::to_vec_pretty(observations)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), observations = observations.len(), "Wrote snapshot.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"[
        {"report_date": "2023-03-31", "fund_type": "TIPF", "company_short": "SEB",
         "relative_change": 1.2, "number_of_participants": 100, "bik_pct": 0.5},
        {"report_date": "2023-06-30T00:00:00", "fund_type": "TIPF", "company_short": "SEB",
         "relative_change": "-", "number_of_participants": "110", "bik_pct": null},
        {"report_date": "garbage", "fund_type": "TIPF", "company_short": "SEB"},
        42
    ]"#;

    #[test]
    fn skips_unusable_records_and_degrades_bad_numbers() {
        let dataset = parse_snapshot(SNAPSHOT).unwrap();
        assert_eq!(dataset.len(), 2);
        let second = &dataset.observations()[1];
        assert_eq!(second.relative_change, None);
        assert_eq!(second.participant_count, Some(110.0));
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(matches!(
            parse_snapshot(r#"{"report_date": "2023-03-31"}"#),
            Err(DatasetError::NotAnArray)
        ));
        assert!(matches!(parse_snapshot("not json"), Err(DatasetError::JsonError(_))));
    }

    #[tokio::test]
    async fn loads_snapshot_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let dataset = load_snapshot(file.path()).await.unwrap();
        assert_eq!(dataset.fund_types(), vec!["TIPF"]);
    }

    #[tokio::test]
    async fn reports_missing_file_with_its_path() {
        let err = load_snapshot(Path::new("/nonexistent/snapshot.json")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }

    #[tokio::test]
    async fn written_snapshot_loads_back() {
        let dataset = parse_snapshot(SNAPSHOT).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_snapshot(file.path(), dataset.observations()).await.unwrap();
        let reloaded = load_snapshot(file.path()).await.unwrap();
        assert_eq!(reloaded.observations(), dataset.observations());
    }
}
