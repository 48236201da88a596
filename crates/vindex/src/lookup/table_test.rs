//! Tests for LookupTable

use super::*;
use shardgate_query::RecordingCursor;

fn params() -> VindexParams {
    VindexParams::new()
        .with("table", "t")
        .with("from", "fromc")
        .with("to", "toc")
}

fn table(params: &VindexParams) -> LookupTable {
    LookupTable::new(params).unwrap()
}

fn bind(pairs: &[(&str, Value)]) -> BindVars {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_new_requires_table_from_to() {
    for missing in ["table", "from", "to"] {
        let params: VindexParams = params()
            .iter()
            .filter(|(k, _)| *k != missing)
            .collect();
        let err = LookupTable::new(&params).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingParam { ref param } if param == missing),
            "expected missing {missing}, got {err}"
        );
    }
}

#[test]
fn test_new_splits_and_trims_from_columns() {
    let lkp = table(&params().with("from", " c1 ,c2, c3"));
    assert_eq!(lkp.from_columns(), ["c1", "c2", "c3"]);
    assert_eq!(lkp.table(), "t");
    assert_eq!(lkp.to(), "toc");
}

#[test]
fn test_new_rejects_blank_names() {
    assert!(LookupTable::new(&params().with("from", "c1,,c2")).is_err());
    assert!(LookupTable::new(&params().with("from", "")).is_err());
    assert!(LookupTable::new(&params().with("table", "  ")).is_err());
}

#[test]
fn test_new_flags_default_off() {
    let lkp = table(&params());
    assert!(!lkp.autocommit());
    assert!(!lkp.upsert_on_insert());
    assert!(!lkp.upsert_on_update());
    assert!(!lkp.disallow_update());
}

#[test]
fn test_new_flag_aliases() {
    let lkp = table(&params().with("autocommit", "true").with("upsert", "true"));
    assert!(lkp.autocommit());
    assert!(lkp.upsert_on_insert());

    let lkp = table(
        &params()
            .with("autocommit_on_insert", "true")
            .with("upsert_on_insert", "true")
            .with("upsert_on_update", "true")
            .with("disallow_update", "true"),
    );
    assert!(lkp.autocommit());
    assert!(lkp.upsert_on_insert());
    assert!(lkp.upsert_on_update());
    assert!(lkp.disallow_update());
}

#[test]
fn test_new_rejects_invalid_flag() {
    let err = LookupTable::new(&params().with("disallow_update", "yes")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "disallow_update value must be 'true' or 'false': 'yes'"
    );
}

#[test]
fn test_to_json() {
    let json = table(&params().with("from", "c1, c2")).to_json().unwrap();
    assert_eq!(
        json,
        serde_json::json!({"table": "t", "from_columns": ["c1", "c2"], "to": "toc"})
    );

    let json = table(&params().with("autocommit", "true").with("upsert", "true"))
        .to_json()
        .unwrap();
    assert_eq!(json["autocommit"], true);
    assert_eq!(json["upsert"], true);
}

// =============================================================================
// Lookup and verify
// =============================================================================

#[tokio::test]
async fn test_lookup_one_select_per_id() {
    let vc = RecordingCursor::new().with_rows(1);
    let results = table(&params())
        .lookup(&vc, &[Value::Int64(1), Value::Int64(2)])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.row_count() == 1));

    let queries = vc.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].method, "VindexLookup");
    assert_eq!(queries[0].sql, "select toc from t where fromc = :fromc");
    assert_eq!(queries[0].bind_vars, bind(&[("fromc", Value::Int64(1))]));
    assert_eq!(queries[1].bind_vars, bind(&[("fromc", Value::Int64(2))]));
    assert!(!queries[0].is_dml);
}

#[tokio::test]
async fn test_lookup_failure_aborts_batch() {
    let vc = RecordingCursor::new().failing();
    let err = table(&params())
        .lookup(&vc, &[Value::Int64(1), Value::Int64(2)])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "lookup.Map: execute failed");
    assert_eq!(vc.query_count(), 1);
}

#[tokio::test]
async fn test_verify_one_statement_per_pair() {
    let vc = RecordingCursor::new().with_rows(1);
    let out = table(&params())
        .verify(
            &vc,
            &[Value::Int64(1), Value::Int64(2)],
            &[Value::Uint64(10), Value::Uint64(20)],
        )
        .await
        .unwrap();

    assert_eq!(out, vec![true, true]);
    let queries = vc.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].method, "VindexVerify");
    assert_eq!(
        queries[0].sql,
        "select fromc from t where fromc = :fromc and toc = :toc"
    );
    assert_eq!(
        queries[1].bind_vars,
        bind(&[("fromc", Value::Int64(2)), ("toc", Value::Uint64(20))])
    );
}

#[tokio::test]
async fn test_verify_no_rows_is_false() {
    let vc = RecordingCursor::new();
    let out = table(&params())
        .verify(&vc, &[Value::Int64(1)], &[Value::Uint64(1)])
        .await
        .unwrap();
    assert_eq!(out, vec![false]);
}

#[tokio::test]
async fn test_verify_length_mismatch() {
    let vc = RecordingCursor::new();
    let err = table(&params())
        .verify(&vc, &[Value::Int64(1), Value::Int64(2)], &[Value::Uint64(1)])
        .await
        .unwrap_err();
    assert!(matches!(err, VindexError::LengthMismatch { left: 2, right: 1, .. }));
    assert_eq!(vc.query_count(), 0);
}

#[tokio::test]
async fn test_verify_failure() {
    let vc = RecordingCursor::new().failing();
    let err = table(&params())
        .verify(&vc, &[Value::Int64(1)], &[Value::Uint64(1)])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "lookup.Verify: execute failed");
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_single_batched_insert() {
    let vc = RecordingCursor::new();
    let lkp = table(&params().with("from", "c1, c2"));
    lkp.create(
        &vc,
        &[
            vec![Value::Int64(1), Value::from("a")],
            vec![Value::Int64(2), Value::from("b")],
        ],
        &[Value::Uint64(10), Value::Uint64(20)],
        false,
    )
    .await
    .unwrap();

    let queries = vc.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].method, "VindexCreate");
    assert_eq!(
        queries[0].sql,
        "insert into t(c1, c2, toc) values(:c10, :c20, :toc0), (:c11, :c21, :toc1)"
    );
    assert_eq!(
        queries[0].bind_vars,
        bind(&[
            ("c10", Value::Int64(1)),
            ("c20", Value::from("a")),
            ("toc0", Value::Uint64(10)),
            ("c11", Value::Int64(2)),
            ("c21", Value::from("b")),
            ("toc1", Value::Uint64(20)),
        ])
    );
    assert!(queries[0].is_dml);
    assert!(!queries[0].autocommit);
}

#[tokio::test]
async fn test_create_ignore_mode() {
    let vc = RecordingCursor::new();
    table(&params())
        .create(&vc, &[vec![Value::Int64(1)]], &[Value::Uint64(1)], true)
        .await
        .unwrap();
    assert_eq!(
        vc.queries()[0].sql,
        "insert ignore into t(fromc, toc) values(:fromc0, :toc0)"
    );
}

#[tokio::test]
async fn test_create_upsert() {
    let vc = RecordingCursor::new();
    table(&params().with("upsert_on_insert", "true"))
        .create(&vc, &[vec![Value::Int64(1)]], &[Value::Uint64(1)], false)
        .await
        .unwrap();
    assert_eq!(
        vc.queries()[0].sql,
        "insert into t(fromc, toc) values(:fromc0, :toc0) \
         on duplicate key update fromc=values(fromc), toc=values(toc)"
    );
}

#[tokio::test]
async fn test_create_autocommit() {
    let vc = RecordingCursor::new();
    table(&params().with("autocommit", "true"))
        .create(&vc, &[vec![Value::Int64(1)]], &[Value::Uint64(1)], false)
        .await
        .unwrap();
    assert!(vc.queries()[0].autocommit);
}

#[tokio::test]
async fn test_create_empty_is_noop() {
    let vc = RecordingCursor::new();
    table(&params()).create(&vc, &[], &[], false).await.unwrap();
    assert_eq!(vc.query_count(), 0);
}

#[tokio::test]
async fn test_create_rejects_bad_shapes() {
    let vc = RecordingCursor::new();
    let lkp = table(&params().with("from", "c1, c2"));

    let err = lkp
        .create(&vc, &[vec![Value::Int64(1)]], &[Value::Uint64(1)], false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VindexError::ColumnCountMismatch { row: 0, got: 1, want: 2, .. }
    ));

    let err = lkp
        .create(&vc, &[vec![Value::Int64(1), Value::Int64(2)]], &[], false)
        .await
        .unwrap_err();
    assert!(matches!(err, VindexError::LengthMismatch { .. }));
    assert_eq!(vc.query_count(), 0);
}

#[tokio::test]
async fn test_create_failure() {
    let vc = RecordingCursor::new().failing();
    let err = table(&params())
        .create(&vc, &[vec![Value::Int64(1)]], &[Value::Uint64(1)], false)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "lookup.Create: execute failed");
}

// =============================================================================
// Delete and update
// =============================================================================

#[tokio::test]
async fn test_delete_one_statement_per_row() {
    let vc = RecordingCursor::new();
    let lkp = table(&params().with("from", "c1, c2"));
    lkp.delete(
        &vc,
        &[
            vec![Value::Int64(1), Value::from("a")],
            vec![Value::Int64(2), Value::from("b")],
        ],
        &Value::Uint64(10),
    )
    .await
    .unwrap();

    let queries = vc.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].method, "VindexDelete");
    assert_eq!(
        queries[0].sql,
        "delete from t where c1 = :c1 and c2 = :c2 and toc = :toc"
    );
    assert_eq!(
        queries[1].bind_vars,
        bind(&[
            ("c1", Value::Int64(2)),
            ("c2", Value::from("b")),
            ("toc", Value::Uint64(10)),
        ])
    );
}

#[tokio::test]
async fn test_delete_failure() {
    let vc = RecordingCursor::new().failing();
    let err = table(&params())
        .delete(&vc, &[vec![Value::Int64(1)]], &Value::Uint64(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "lookup.Delete: execute failed");
}

#[tokio::test]
async fn test_update_deletes_then_inserts() {
    let vc = RecordingCursor::new();
    table(&params())
        .update(&vc, &[Value::Int64(1)], &Value::Uint64(10), &[Value::Int64(2)])
        .await
        .unwrap();

    let queries = vc.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].sql, "delete from t where fromc = :fromc and toc = :toc");
    assert_eq!(
        queries[0].bind_vars,
        bind(&[("fromc", Value::Int64(1)), ("toc", Value::Uint64(10))])
    );
    assert_eq!(queries[1].sql, "insert into t(fromc, toc) values(:fromc0, :toc0)");
    assert_eq!(
        queries[1].bind_vars,
        bind(&[("fromc0", Value::Int64(2)), ("toc0", Value::Uint64(10))])
    );
}

#[tokio::test]
async fn test_update_upsert_uses_update_flag() {
    let vc = RecordingCursor::new();
    table(&params().with("upsert_on_update", "true"))
        .update(&vc, &[Value::Int64(1)], &Value::Uint64(10), &[Value::Int64(2)])
        .await
        .unwrap();

    let queries = vc.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].sql.starts_with("delete from t"));
    assert!(queries[1].sql.ends_with("on duplicate key update fromc=values(fromc), toc=values(toc)"));
}

#[tokio::test]
async fn test_update_disallowed() {
    let vc = RecordingCursor::new();
    let err = table(&params().with("disallow_update", "true"))
        .update(&vc, &[Value::Int64(1)], &Value::Uint64(10), &[Value::Int64(2)])
        .await
        .unwrap_err();
    assert!(matches!(err, VindexError::UpdateDisallowed { ref table } if table == "t"));
    assert_eq!(vc.query_count(), 0);
}
