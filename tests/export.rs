use dbdesk::db::{ConnectionTarget, Registry};
use dbdesk::export::{default_export_path, export_csv, to_csv_string};
use pretty_assertions::assert_eq;

#[test]
fn exports_query_result_as_quoted_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = Registry::new();
    registry
        .open("main", ConnectionTarget::sqlite(dir.path().join("e.db").to_string_lossy()))
        .unwrap();
    registry.execute("main", "CREATE TABLE t (id INTEGER, label TEXT)").unwrap();
    registry.execute("main", "INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, NULL)").unwrap();

    let result = registry.execute("main", "SELECT id, label FROM t ORDER BY id").unwrap();
    assert_eq!(
        to_csv_string(&result).unwrap(),
        "\"id\",\"label\"\n\"1\",\"a\"\n\"2\",\"b\"\n\"3\",\"\"\n"
    );

    let path = default_export_path(dir.path());
    export_csv(&result, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), to_csv_string(&result).unwrap());
}
