use magpie_engine::data::{DataError, read_records};
use std::path::Path;

async fn write_temp(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    tokio::fs::write(&path, content).await.unwrap();
    path
}

#[tokio::test]
async fn reads_json_rows_with_scalar_coercion() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(
        dir.path(),
        "employees.json",
        r#"[
            {"empId": "EMPch11234", "salary": 50000, "active": true, "notes": null},
            {"empId": "EMPch21235", "salary": "60000"}
        ]"#,
    )
    .await;

    let records = read_records(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("empId"), Some("EMPch11234"));
    assert_eq!(records[0].get("salary"), Some("50000"));
    assert_eq!(records[0].get("active"), Some("true"));
    assert_eq!(records[0].get("notes"), None);
    assert_eq!(records[1].get("salary"), Some("60000"));
}

#[tokio::test]
async fn reads_yaml_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(
        dir.path(),
        "employees.yaml",
        "- empId: EMPff1001\n  dept: Development\n- empId: EMPff1002\n  dept: QA\n",
    )
    .await;

    let records = read_records(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("dept"), Some("Development"));
    assert_eq!(records[1].get("empId"), Some("EMPff1002"));
}

#[tokio::test]
async fn rejects_unsupported_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "employees.xlsx", "not a spreadsheet").await;

    let err = read_records(&path).await.unwrap_err();
    assert!(matches!(err, DataError::UnsupportedFormat(ext) if ext == "xlsx"));
}

#[tokio::test]
async fn rejects_non_tabular_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "employees.json", r#"{"empId": "EMPch1"}"#).await;

    let err = read_records(&path).await.unwrap_err();
    assert!(matches!(err, DataError::NotTabular(_)));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_records(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}
