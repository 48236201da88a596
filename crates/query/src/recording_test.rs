//! Tests for RecordingCursor

use super::*;

fn bind(name: &str, value: Value) -> BindVars {
    let mut vars = BindVars::new();
    vars.insert(name.to_string(), value);
    vars
}

#[tokio::test]
async fn test_select_returns_configured_rows() {
    let vc = RecordingCursor::new().with_rows(2);
    let result = vc
        .execute("VindexLookup", "select toc from t where fromc = :fromc", &bind("fromc", Value::Int64(1)), false)
        .await
        .unwrap();
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.rows[0], vec![Value::Int64(1)]);
}

#[tokio::test]
async fn test_dml_returns_affected() {
    let vc = RecordingCursor::new().with_rows(3);
    let result = vc
        .execute("VindexDelete", "delete from t where fromc = :fromc", &BindVars::new(), true)
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.rows_affected, 1);
}

#[tokio::test]
async fn test_records_in_order() {
    let vc = RecordingCursor::new();
    vc.execute("A", "select 1", &BindVars::new(), false).await.unwrap();
    vc.execute_autocommit("B", "insert into t", &BindVars::new(), true)
        .await
        .unwrap();

    let queries = vc.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].method, "A");
    assert!(!queries[0].autocommit);
    assert_eq!(queries[1].method, "B");
    assert!(queries[1].autocommit);
    assert!(queries[1].is_dml);

    vc.clear();
    assert_eq!(vc.query_count(), 0);
}

#[tokio::test]
async fn test_failing_cursor_still_records() {
    let vc = RecordingCursor::new().failing();
    let err = vc
        .execute("VindexLookup", "select 1", &BindVars::new(), false)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "execute failed");
    assert_eq!(vc.query_count(), 1);
}

#[tokio::test]
async fn test_custom_row() {
    let vc = RecordingCursor::new()
        .with_rows(1)
        .with_row(vec![Value::VarBinary(b"ksid".to_vec())]);
    let result = vc.execute("A", "SELECT x", &BindVars::new(), false).await.unwrap();
    assert_eq!(result.rows[0][0], Value::VarBinary(b"ksid".to_vec()));
}
