use std::fs;

use shelf_catalog::*;
use shelf_import::*;
use shelf_store::CatalogStore;
use tempfile::TempDir;

const SHEET: &str = "\
Title,Author,Link,Genre,Tags,Type
Deep Work,Cal Newport,https://example.com/dw,self-improvement,focus,book
SPQR,Mary Beard,https://example.com/spqr,history,\"rome, ancient\",book
";

struct FailingSource;

impl IngestSource for FailingSource {
    fn name(&self) -> String {
        "failing".to_string()
    }

    fn policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::Skip
    }

    fn fetch(&self) -> Result<Vec<NewResource>, ImportError> {
        Err(ImportError::Io {
            path: "nowhere.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        })
    }
}

#[test]
fn csv_file_import_twice_adds_once() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("reading.csv");
    fs::write(&csv_path, SHEET).unwrap();
    let store = CatalogStore::in_dir(tmp.path());
    let source = CsvFileSource::new(&csv_path);

    let first = ingest(&store, &source, &SilentProgress).unwrap();
    assert_eq!(first.added, 2);
    let after_first = store.load_resources().unwrap();
    assert_eq!(after_first.resources[0].id, "self-improvement001");
    assert_eq!(after_first.resources[1].tags, vec!["rome", "ancient"]);

    let second = ingest(&store, &source, &SilentProgress).unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(store.load_resources().unwrap(), after_first);
}

#[test]
fn import_continues_numbering_from_existing_catalog() {
    let tmp = TempDir::new().unwrap();
    let store = CatalogStore::in_dir(tmp.path());
    shelf_store::add_resource(
        &store,
        NewResource {
            title: "Mindset".into(),
            kind: "book".into(),
            genre: "self-improvement".into(),
            status: "viewed".into(),
            link: "https://example.com/mindset".into(),
            ..Default::default()
        },
    )
    .unwrap();

    let csv_path = tmp.path().join("reading.csv");
    fs::write(&csv_path, SHEET).unwrap();
    ingest(&store, &CsvFileSource::new(&csv_path), &SilentProgress).unwrap();

    let ids: Vec<_> = store
        .load_resources()
        .unwrap()
        .resources
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["self-improvement001", "self-improvement002", "history001"]);
}

#[test]
fn failed_fetch_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let store = CatalogStore::in_dir(tmp.path());

    let err = ingest(&store, &FailingSource, &SilentProgress).unwrap_err();
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("nowhere.csv"));
    assert!(!store.resources_path().exists());
}

#[test]
fn missing_csv_file_is_reported_with_path() {
    let tmp = TempDir::new().unwrap();
    let source = CsvFileSource::new(tmp.path().join("absent.csv"));
    let err = source.fetch().unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
