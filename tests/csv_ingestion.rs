use std::fs;
use std::path::Path;

use csv_tap::config::FileConfig;
use csv_tap::ingestion::RecordStream;
use csv_tap::types::{Record, SchemaField};
use csv_tap::ExtractError;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn collect(stream: &RecordStream) -> Vec<Record> {
    stream
        .records(None)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn pairs(record: &Record) -> Vec<(&str, &str)> {
    record.iter().collect()
}

#[test]
fn schema_and_records_from_plain_csv() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "people.csv", "id,name\n1,Ann\n2,Bo\n");
    let stream = RecordStream::new(FileConfig::new(dir.path().join("people.csv")));

    let schema = stream.schema().unwrap();
    assert_eq!(
        schema.fields,
        vec![SchemaField::text("id"), SchemaField::text("name")]
    );

    let records = collect(&stream);
    assert_eq!(records.len(), 2);
    assert_eq!(pairs(&records[0]), vec![("id", "1"), ("name", "Ann")]);
    assert_eq!(pairs(&records[1]), vec![("id", "2"), ("name", "Bo")]);
}

#[test]
fn ragged_rows_are_paired_up_to_the_shorter_side() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "ragged.csv", "id,name,city\n1,Ann\n2,Bo,Oslo,extra\n");
    let stream = RecordStream::new(FileConfig::new(dir.path()));

    let records = collect(&stream);
    assert_eq!(pairs(&records[0]), vec![("id", "1"), ("name", "Ann")]);
    assert_eq!(records[0].get("city"), None);
    assert_eq!(
        pairs(&records[1]),
        vec![("id", "2"), ("name", "Bo"), ("city", "Oslo")]
    );
}

#[test]
fn each_file_uses_its_own_header() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "people.csv", "id,name\n1,Ann\n");
    write(dir.path(), "stock.csv", "sku,qty\nA-1,5\n");
    let stream = RecordStream::new(FileConfig::new(dir.path()));

    let records = collect(&stream);
    assert_eq!(records.len(), 2);
    for record in &records {
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert!(
            names == ["id", "name"] || names == ["sku", "qty"],
            "mixed header fields: {names:?}"
        );
    }
    assert!(records.iter().any(|r| r.get("sku") == Some("A-1")));
    assert!(records.iter().any(|r| r.get("name") == Some("Ann")));
}

#[test]
fn quoted_fields_survive_into_records() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "notes.csv",
        "id,note\r\n1,\"hello, world\"\r\n2,\"two\nlines\"\r\n",
    );
    let stream = RecordStream::new(FileConfig::new(dir.path()));

    let records = collect(&stream);
    assert_eq!(records[0].get("note"), Some("hello, world"));
    assert_eq!(records[1].get("note"), Some("two\nlines"));
}

#[test]
fn record_json_is_an_object_of_strings() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "people.csv", "id,name\n1,Ann\n");
    let stream = RecordStream::new(FileConfig::new(dir.path()));

    let records = collect(&stream);
    assert_eq!(
        records[0].to_json(),
        serde_json::json!({"id": "1", "name": "Ann"})
    );
}

#[test]
fn schema_errors_on_empty_first_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "empty.csv", "");
    let stream = RecordStream::new(FileConfig::new(dir.path().join("empty.csv")));

    let err = stream.schema().unwrap_err();
    assert!(matches!(err, ExtractError::EmptyFile { .. }));
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn file_paths_are_cached_per_instance() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.csv", "id\n1\n");
    let stream = RecordStream::new(FileConfig::new(dir.path()));

    let first = stream.file_paths().unwrap().to_vec();
    write(dir.path(), "b.csv", "id\n2\n");
    let second = stream.file_paths().unwrap();
    assert_eq!(second, first.as_slice());
    assert_eq!(collect(&stream).len(), 1);

    // A fresh stream over the same directory sees the new file.
    let fresh = RecordStream::new(FileConfig::new(dir.path()));
    assert_eq!(fresh.file_paths().unwrap().len(), 2);
}

#[test]
fn records_can_be_restarted_per_call() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "people.csv", "id\n1\n2\n3\n");
    let stream = RecordStream::new(FileConfig::new(dir.path()));

    let first: Vec<_> = stream.records(None).unwrap().take(1).collect();
    assert_eq!(first.len(), 1);
    assert_eq!(collect(&stream).len(), 3);
}
