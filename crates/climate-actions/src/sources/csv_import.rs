//! Converts a CSV export of the catalog into the static JSON snapshot.

use super::mapping::{header_fields, row_to_record};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CsvImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Header names are the record's field names (`id`, `actionName`, ...).
pub fn build_snapshot<R: Read>(reader: R) -> Result<Vec<Value>, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let fields = header_fields(csv_reader.headers()?.iter());
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        if let Some(record) = row_to_record(&fields, row.iter()) {
            records.push(record);
        }
    }

    Ok(records)
}

/// Reads `input` and writes the pretty-printed snapshot to `output`,
/// creating parent directories. Returns the number of records written.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize, CsvImportError> {
    let file = std::fs::File::open(input).map_err(|source| CsvImportError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let records = build_snapshot(file)?;

    let write_error = |source: std::io::Error| CsvImportError::Io {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let body = serde_json::to_vec_pretty(&records)?;
    std::fs::write(output, body).map_err(write_error)?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema::validate_actions;
    use serde_json::json;

    const CSV: &str = "id,city,country,actionName,category,sector,costTier,investmentUSD,status,reductionPotentialPct,implementationTimeYears,description,owner,lastUpdated,tags\n\
serra-01, Serra ,Brazil,Landfill gas capture,Mitigation,Waste,High,1250000,Completed,12%,3,\"Capture methane, flare surplus\",,2025-05-12,methane; landfill\n\
\n\
recife-02,Recife,Brazil,Mangrove restoration,Adaptation,AFOLU,Low,,In progress,,,Restore coastal mangroves,Prefeitura,2025-04-01,\n";

    #[test]
    fn converts_rows_into_validatable_records() {
        let records = build_snapshot(CSV.as_bytes()).expect("csv converts");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["city"], "Serra");
        assert_eq!(records[0]["investmentUSD"], 1_250_000);
        assert_eq!(records[0]["tags"], json!(["methane", "landfill"]));
        assert_eq!(records[0]["description"], "Capture methane, flare surplus");
        assert!(records[0].get("owner").is_none());
        assert!(records[1].get("investmentUSD").is_none());
        assert!(records[1].get("tags").is_none());

        let validated = validate_actions(&Value::Array(records)).expect("snapshot validates");
        assert_eq!(validated[1].owner.as_deref(), Some("Prefeitura"));
    }

    #[test]
    fn convert_file_writes_pretty_snapshot() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("actions.csv");
        let output = dir.path().join("public").join("actions.json");
        std::fs::write(&input, CSV).expect("write csv");

        let written = convert_file(&input, &output).expect("conversion succeeds");
        assert_eq!(written, 2);
        let text = std::fs::read_to_string(&output).expect("snapshot written");
        assert!(text.starts_with("[\n  {"));
    }

    #[test]
    fn missing_input_reports_path() {
        let err = convert_file(Path::new("./missing.csv"), Path::new("./out.json"))
            .expect_err("missing input");
        assert!(matches!(err, CsvImportError::Io { .. }));
    }
}
