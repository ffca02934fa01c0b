//! Filesystem document store
//!
//! Layout: `<root>/<YYYY>/<MM>/<DD>/<id>/<id>.json` for the record and
//! `<root>/<YYYY>/<MM>/<DD>/<id>/<id>.xml` for the wrapped body.

use crate::parser::DocumentRecord;
use crate::storage::identifier::{build_id, build_path};
use crate::storage::traits::{DocumentStore, StorageError, StorageResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the structured record artifact
pub const RECORD_EXTENSION: &str = "json";

/// Extension of the raw body artifact
pub const BODY_EXTENSION: &str = "xml";

/// Element wrapping the raw body markup
pub const BODY_ROOT_TAG: &str = "texto";

/// Stores documents under a root directory, partitioned by crawl day
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentStore for FileStore {
    fn persist(&self, day: NaiveDate, record: &DocumentRecord) -> StorageResult<PathBuf> {
        let id = build_id(&record.bulletin_number, day, &record.publication_id);
        let dir = build_path(&self.root, day, &id);

        // create_dir_all is a no-op for an existing tree
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;

        write_artifacts(&dir, &id, record)?;

        tracing::info!(
            "Documents {id}.{RECORD_EXTENSION} and {id}.{BODY_EXTENSION} saved to {}",
            dir.display()
        );

        Ok(dir)
    }
}

/// Writes both artifacts for `id` into `dir`, replacing any previous versions
pub fn write_artifacts(dir: &Path, id: &str, record: &DocumentRecord) -> StorageResult<()> {
    let record_path = dir.join(format!("{id}.{RECORD_EXTENSION}"));
    write_file(&record_path, &to_pretty_json(record)?)?;

    let body_path = dir.join(format!("{id}.{BODY_EXTENSION}"));
    write_file(&body_path, wrap_body(&record.raw_body).as_bytes())?;

    Ok(())
}

/// Wraps raw body markup in the fixed root element
pub fn wrap_body(raw_body: &str) -> String {
    format!("<{BODY_ROOT_TAG}>{raw_body}</{BODY_ROOT_TAG}>")
}

fn write_file(path: &Path, contents: &[u8]) -> StorageResult<()> {
    fs::write(path, contents).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn to_pretty_json(record: &DocumentRecord) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn record(extract: &str, body: &str) -> DocumentRecord {
        DocumentRecord {
            bulletin_number: "45".to_string(),
            bulletin_date: "07-03-2024".to_string(),
            doc_type: "Edicto".to_string(),
            publication_id: "1234".to_string(),
            section: "III. Administración Local".to_string(),
            authority: "Ayuntamiento de Murcia".to_string(),
            extract: extract.to_string(),
            url: "https://www.borm.es/#/home/anuncio/07-03-2024/1234".to_string(),
            raw_body: body.to_string(),
        }
    }

    #[test]
    fn test_persist_writes_both_artifacts() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let dir = store.persist(day(), &record("Edicto de notificación", "<p>uno</p>")).unwrap();

        assert_eq!(dir, tmp.path().join("2024/03/07/45-07032024-1234"));

        let json = fs::read_to_string(dir.join("45-07032024-1234.json")).unwrap();
        let parsed: DocumentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.extract, "Edicto de notificación");
        assert_eq!(parsed.section, "III. Administración Local");
        assert_eq!(parsed.raw_body, "");
        assert!(json.contains("Administración"), "non-ASCII must not be escaped");
        assert!(json.contains("\n    \"number\": \"45\""));

        let xml = fs::read_to_string(dir.join("45-07032024-1234.xml")).unwrap();
        assert_eq!(xml, "<texto><p>uno</p></texto>");
    }

    #[test]
    fn test_persist_overwrites_previous_run() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store.persist(day(), &record("old extract", "<p>old</p>")).unwrap();
        let dir = store.persist(day(), &record("new", "<p>new</p>")).unwrap();

        let parsed: DocumentRecord =
            serde_json::from_str(&fs::read_to_string(dir.join("45-07032024-1234.json")).unwrap())
                .unwrap();
        assert_eq!(parsed.extract, "new");
        assert_eq!(
            fs::read_to_string(dir.join("45-07032024-1234.xml")).unwrap(),
            "<texto><p>new</p></texto>"
        );
    }

    #[test]
    fn test_persist_without_publication_id() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        let mut rec = record("x", "");
        rec.publication_id.clear();

        let dir = store.persist(day(), &rec).unwrap();

        assert!(dir.join("45-07032024-.json").is_file());
        assert_eq!(
            fs::read_to_string(dir.join("45-07032024-.xml")).unwrap(),
            "<texto></texto>"
        );
    }

    #[test]
    fn test_unwritable_root_is_reported() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();
        let store = FileStore::new(&blocker);

        let result = store.persist(day(), &record("x", ""));
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }
}
