use super::*;
use crate::error::ParseErrorKind;
use crate::parser::parse_sql_with_dialect;
use crate::types::StatementType::{Create, Delete, Insert, Select, Unknown, Update};

fn col(table: &str, column: &str, statement_type: StatementType) -> ColumnAccess {
    ColumnAccess::new(table, column, statement_type)
}

fn patterns(sql: &str) -> Vec<ColumnAccess> {
    analyze_sql(sql)
        .unwrap_or_else(|err| panic!("analysis failed for {sql}: {err}"))
        .column_access_patterns
}

fn patterns_with(sql: &str, dialect: Dialect, options: AnalysisOptions) -> Vec<ColumnAccess> {
    let request = AnalyzeRequest::new(sql)
        .with_dialect(dialect)
        .with_options(options);
    analyze(&request).unwrap().column_access_patterns
}

#[test]
fn select_without_table_yields_nothing() {
    assert!(patterns("select 1").is_empty());
    assert!(patterns("SELECT 1 + 2 AS three").is_empty());
}

#[test]
fn explicit_dual_is_discarded() {
    assert!(patterns("SELECT 1 FROM dual").is_empty());
}

#[test]
fn star_takes_the_only_table() {
    assert_eq!(patterns("select * from t"), vec![col("t", "*", Select)]);
}

#[test]
fn explicit_alias_resolves_to_table() {
    assert_eq!(
        patterns("select a.x from t as a"),
        vec![col("t", "x", Select)]
    );
}

#[test]
fn aliased_subquery_columns_pass_through() {
    assert_eq!(
        patterns("select s.y from (select b.y from b) as s"),
        vec![col("b", "y", Select)]
    );
}

#[test]
fn qualified_stars_and_join_conditions() {
    assert_eq!(
        patterns("SELECT u.*, o.total FROM users u JOIN orders o ON u.id = o.user_id"),
        vec![
            col("orders", "total", Select),
            col("orders", "user_id", Select),
            col("users", "*", Select),
            col("users", "id", Select),
        ]
    );
}

#[test]
fn ambiguous_column_lists_every_table() {
    assert_eq!(
        patterns("SELECT id FROM users JOIN orders ON users.id = orders.user_id"),
        vec![
            col("orders", "user_id", Select),
            col("users,orders", "id", Select),
            col("users", "id", Select),
        ]
    );
}

#[test]
fn using_columns_are_bare() {
    assert_eq!(
        patterns("SELECT a FROM t1 JOIN t2 USING (k)"),
        vec![col("t1,t2", "a", Select), col("t1,t2", "k", Select)]
    );
}

#[test]
fn count_star_counts_as_star_access() {
    assert_eq!(
        patterns("SELECT count(*) FROM events"),
        vec![col("events", "*", Select)]
    );
}

#[test]
fn group_and_order_by_keep_select_type() {
    assert_eq!(
        patterns("SELECT dept, count(*) FROM emp GROUP BY dept HAVING count(*) > 1 ORDER BY dept"),
        vec![col("emp", "*", Select), col("emp", "dept", Select)]
    );
}

#[test]
fn scalar_subquery_tables_join_the_parent() {
    assert_eq!(
        patterns("SELECT (SELECT max(total) FROM orders) AS m FROM users"),
        vec![col("orders", "total", Select)]
    );
}

#[test]
fn subquery_keeps_its_own_statement_type() {
    assert_eq!(
        patterns("DELETE FROM orders WHERE user_id IN (SELECT id FROM users WHERE banned)"),
        vec![
            col("orders,users", "user_id", Delete),
            col("users", "banned", Select),
            col("users", "id", Select),
        ]
    );
}

#[test]
fn correlated_exists_columns_resolve_in_outer_scope() {
    assert_eq!(
        patterns("SELECT o.id FROM orders o WHERE EXISTS (SELECT 1 FROM users u WHERE u.id = o.user_id)"),
        vec![
            col("orders", "id", Select),
            col("orders", "user_id", Select),
            col("users", "id", Select),
        ]
    );
}

#[test]
fn update_assignments_and_filter() {
    assert_eq!(
        patterns("UPDATE users SET name = 'x' WHERE id = 1"),
        vec![col("users", "id", Update), col("users", "name", Update)]
    );
}

#[test]
fn update_with_from_clause() {
    assert_eq!(
        patterns("UPDATE t SET a = s.a FROM s WHERE t.id = s.id"),
        vec![
            col("s", "a", Update),
            col("s", "id", Update),
            col("t,s", "a", Update),
            col("t", "id", Update),
        ]
    );
}

#[test]
fn delete_filter() {
    assert_eq!(
        patterns("DELETE FROM orders WHERE created_at < '2020-01-01'"),
        vec![col("orders", "created_at", Delete)]
    );
}

#[test]
fn insert_column_list() {
    assert_eq!(
        patterns("INSERT INTO users (id, name) VALUES (1, 'a')"),
        vec![col("users", "id", Insert), col("users", "name", Insert)]
    );
}

#[test]
fn insert_select_shares_the_insert_scope() {
    assert_eq!(
        patterns("INSERT INTO archive (id) SELECT id FROM users"),
        vec![
            col("archive,users", "id", Insert),
            col("archive,users", "id", Select),
        ]
    );
}

#[test]
fn on_duplicate_key_update_targets() {
    assert_eq!(
        patterns_with(
            "INSERT INTO t (a) VALUES (1) ON DUPLICATE KEY UPDATE b = 2",
            Dialect::Mysql,
            AnalysisOptions::default(),
        ),
        vec![col("t", "a", Insert), col("t", "b", Insert)]
    );
}

#[test]
fn create_table_column_definitions() {
    assert_eq!(
        patterns("CREATE TABLE t (a INT, b TEXT)"),
        vec![col("t", "a", Create), col("t", "b", Create)]
    );
}

#[test]
fn create_view_query_is_a_select() {
    assert_eq!(
        patterns("CREATE VIEW v AS SELECT u.id FROM users u"),
        vec![col("users", "id", Select)]
    );
}

#[test]
fn drop_reports_no_columns() {
    assert!(patterns("DROP TABLE t").is_empty());
}

#[test]
fn merge_is_walked_as_unknown() {
    assert_eq!(
        patterns("MERGE INTO t USING s ON t.id = s.id WHEN MATCHED THEN UPDATE SET t.v = s.v"),
        vec![
            col("s", "id", Unknown),
            col("s", "v", Unknown),
            col("t", "id", Unknown),
            col("t", "v", Unknown),
        ]
    );
}

#[test]
fn cte_columns_resolve_through_alias() {
    assert_eq!(
        patterns("WITH recent_orders AS (SELECT id, total FROM orders) SELECT r.id FROM recent_orders AS r"),
        vec![col("orders", "id", Select), col("orders", "total", Select)]
    );
}

#[test]
fn unqualified_cte_reference_fills_from_source_table() {
    assert_eq!(
        patterns("WITH c AS (SELECT id FROM users) SELECT id FROM c"),
        vec![col("users", "id", Select)]
    );
}

#[test]
fn lower_case_sensitivity_folds_unquoted_identifiers() {
    let options = AnalysisOptions {
        case_sensitivity: Some(CaseSensitivity::Lower),
        ..Default::default()
    };
    assert_eq!(
        patterns_with("SELECT U.Name FROM Users AS u", Dialect::Generic, options.clone()),
        vec![col("users", "name", Select)]
    );
    assert_eq!(
        patterns_with(r#"SELECT "Name" FROM "Users""#, Dialect::Postgres, options),
        vec![col("Users", "Name", Select)]
    );
}

#[test]
fn exact_case_keeps_identifiers_verbatim() {
    assert_eq!(
        patterns("SELECT u.name FROM Users AS U"),
        vec![col("u", "name", Select)]
    );
}

#[test]
fn literals_do_not_change_access_patterns() {
    assert_eq!(
        patterns("SELECT a FROM t WHERE b = 1 AND c IN (1, 2)"),
        patterns("SELECT a FROM t WHERE b = 99 AND c IN ('x')")
    );
}

#[test]
fn analyze_returns_redacted_query() {
    let result = analyze_sql("SELECT * FROM t WHERE id = 5").unwrap();
    assert_eq!(result.redacted_query, "SELECT * FROM t WHERE id = ?");
    assert_eq!(
        result.column_access_patterns,
        vec![col("t", "*", Select), col("t", "id", Select)]
    );
}

#[test]
fn analysis_is_deterministic() {
    let sql = "SELECT a.x, b.y, z FROM a JOIN b ON a.k = b.k WHERE z > 3";
    assert_eq!(analyze_sql(sql).unwrap(), analyze_sql(sql).unwrap());
}

#[test]
fn statement_level_entry_point() {
    let statements = parse_sql_with_dialect("SELECT id FROM users", Dialect::Generic).unwrap();
    let columns = column_access_patterns(&statements[0], &AnalysisOptions::default()).unwrap();
    assert_eq!(columns, vec![col("users", "id", Select)]);
}

#[test]
fn malformed_sql_is_a_parse_error() {
    let err = analyze_sql("select from").unwrap_err();
    assert!(matches!(err, AnalyzeError::Parse(_)));
}

#[test]
fn batches_are_rejected() {
    let err = analyze_sql("SELECT 1; SELECT 2").unwrap_err();
    assert_eq!(
        err.as_parse_error().map(|e| e.kind),
        Some(ParseErrorKind::StatementCount)
    );
}

#[test]
fn nesting_beyond_max_depth_fails() {
    let options = AnalysisOptions {
        max_depth: Some(3),
        ..Default::default()
    };
    let request = AnalyzeRequest::new("SELECT a FROM t WHERE ((((a = 1))))").with_options(options);
    assert_eq!(
        analyze(&request).unwrap_err(),
        AnalyzeError::DepthExceeded { limit: 3 }
    );
}

#[test]
fn outer_join_marker_keeps_its_column() {
    assert_eq!(
        patterns_with(
            "SELECT a.x FROM a, b WHERE a.id = b.id(+)",
            Dialect::Snowflake,
            AnalysisOptions::default(),
        ),
        vec![col("a", "id", Select), col("a", "x", Select), col("b", "id", Select)]
    );
}

#[test]
fn member_of_operand_is_a_column() {
    assert_eq!(
        patterns_with(
            "SELECT t.id FROM t WHERE 1 MEMBER OF(t.arr)",
            Dialect::Mysql,
            AnalysisOptions::default(),
        ),
        vec![col("t", "arr", Select), col("t", "id", Select)]
    );
}

#[test]
fn lambda_body_columns_without_parameters() {
    assert_eq!(
        patterns_with(
            "SELECT transform(t.arr, v -> v + t.z) FROM t",
            Dialect::Databricks,
            AnalysisOptions::default(),
        ),
        vec![col("t", "arr", Select), col("t", "z", Select)]
    );
}

#[test]
fn method_call_receiver_is_a_column() {
    assert_eq!(
        patterns_with(
            "SELECT t.col.value('x', 'int') FROM t",
            Dialect::Mssql,
            AnalysisOptions::default(),
        ),
        vec![col("t", "col", Select)]
    );
}

#[test]
fn named_window_clause_columns() {
    assert_eq!(
        patterns("SELECT row_number() OVER w FROM t WINDOW w AS (PARTITION BY k ORDER BY z)"),
        vec![col("t", "k", Select), col("t", "z", Select)]
    );
}

#[test]
fn distinct_on_columns() {
    assert_eq!(
        patterns_with(
            "SELECT DISTINCT ON (k) z FROM t",
            Dialect::Postgres,
            AnalysisOptions::default(),
        ),
        vec![col("t", "k", Select), col("t", "z", Select)]
    );
}

#[test]
fn window_frame_bound_columns() {
    assert_eq!(
        patterns("SELECT sum(x) OVER (ORDER BY d ROWS BETWEEN n PRECEDING AND CURRENT ROW) FROM t"),
        vec![col("t", "d", Select), col("t", "n", Select), col("t", "x", Select)]
    );
}
