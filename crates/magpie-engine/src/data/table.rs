use magpie_common::record::Record;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse data file: {0}")]
    Parse(String),
    #[error("unsupported data format '{0}'; expected json or yaml")]
    UnsupportedFormat(String),
    #[error("expected an array of row objects in {0}")]
    NotTabular(String),
}

/// Read a tabular data file into field-named records.
///
/// The file holds an array of row objects; scalar cells are coerced to
/// strings the way `Record::from_row` does.
pub async fn read_records(path: &Path) -> Result<Vec<Record>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let content = tokio::fs::read_to_string(path).await?;

    let rows: Value = match extension.as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| DataError::Parse(e.to_string()))?,
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| DataError::Parse(e.to_string()))?
        }
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    let Value::Array(rows) = rows else {
        return Err(DataError::NotTabular(path.display().to_string()));
    };
    rows.iter()
        .map(|row| {
            row.as_object()
                .map(Record::from_row)
                .ok_or_else(|| DataError::NotTabular(path.display().to_string()))
        })
        .collect()
}
