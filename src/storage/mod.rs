//! Dataset persistence.
//!
//! Datasets are ordered sequences of flat [`Record`]s. Rows may carry
//! different key sets; writers render absent keys as empty fields.
//!
//! ## Backends
//!
//! ```text
//! *.csv (and anything else) -> CsvStorage   header = union of keys, first-seen order
//! *.json                    -> JsonStorage  array of flat objects
//! ```

pub mod csv;
pub mod json;

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::Record;

// Re-export for convenience
pub use self::csv::CsvStorage;
pub use self::json::JsonStorage;

/// Trait for dataset storage backends.
#[async_trait]
pub trait DatasetStorage: Send + Sync {
    /// Write rows to `dest`, creating or overwriting it.
    async fn write_rows(&self, rows: &[Record], dest: &Path) -> Result<()>;

    /// Read all rows from `src` in file order.
    async fn read_rows(&self, src: &Path) -> Result<Vec<Record>>;

    /// Read rows, treating a missing file as an empty dataset.
    async fn read_existing(&self, src: &Path) -> Result<Vec<Record>> {
        if tokio::fs::try_exists(src).await? {
            self.read_rows(src).await
        } else {
            Ok(Vec::new())
        }
    }
}

/// Pick a backend from the file extension.
pub fn for_path(path: &Path) -> Box<dyn DatasetStorage> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Box::new(JsonStorage),
        _ => Box::new(CsvStorage),
    }
}

/// Upsert `incoming` rows into `existing` by the value of `key`.
///
/// A row whose key matches an existing row replaces it in place; other rows
/// are appended in order. Rows without the key are always appended.
pub fn merge_by_key(mut existing: Vec<Record>, incoming: Vec<Record>, key: &str) -> Vec<Record> {
    let mut positions: HashMap<String, usize> = existing
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(key).map(|k| (k.to_string(), i)))
        .collect();

    for row in incoming {
        match row.get(key).map(str::to_string) {
            Some(k) => match positions.get(&k) {
                Some(&i) => existing[i] = row,
                None => {
                    positions.insert(k, existing.len());
                    existing.push(row);
                }
            },
            None => existing.push(row),
        }
    }
    existing
}

/// Union of all row keys in first-seen order.
pub fn header_of(rows: &[Record]) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !header.iter().any(|h| h == key) {
                header.push(key.to_string());
            }
        }
    }
    header
}

/// Write bytes atomically (write to temp, then rename).
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_merge_by_key_updates_and_appends() {
        let existing = vec![
            row(&[("url", "a"), ("team1_kills", "1")]),
            row(&[("url", "b"), ("team1_kills", "2")]),
        ];
        let incoming = vec![
            row(&[("url", "b"), ("team1_kills", "20")]),
            row(&[("url", "c"), ("team1_kills", "3")]),
        ];

        let merged = merge_by_key(existing, incoming, "url");

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].get("team1_kills"), Some("20"));
        assert_eq!(merged[2].get("url"), Some("c"));
    }

    #[test]
    fn test_header_union_first_seen() {
        let rows = vec![row(&[("b", "1"), ("a", "2")]), row(&[("a", "3"), ("c", "4")])];
        assert_eq!(header_of(&rows), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_for_path_by_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let rows = vec![row(&[("url", "a")])];

        let json_path = tmp.path().join("rows.json");
        for_path(&json_path).write_rows(&rows, &json_path).await.unwrap();
        let text = std::fs::read_to_string(&json_path).unwrap();
        assert!(text.trim_start().starts_with('['));

        let csv_path = tmp.path().join("rows.csv");
        for_path(&csv_path).write_rows(&rows, &csv_path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), "url\na\n");
    }

    #[tokio::test]
    async fn test_read_existing_missing_file_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let rows = CsvStorage
            .read_existing(&tmp.path().join("nope.csv"))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
