// src/storage/csv.rs

//! Delimited-file dataset backend.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::storage::{DatasetStorage, header_of, write_atomic};

/// Comma-separated dataset files with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvStorage;

impl CsvStorage {
    /// Render rows to CSV bytes. The header is the union of all keys.
    pub fn to_bytes(rows: &[Record]) -> Result<Vec<u8>> {
        let header = header_of(rows);
        let mut writer = ::csv::Writer::from_writer(Vec::new());

        if !header.is_empty() {
            writer.write_record(&header)?;
        }
        for row in rows {
            writer.write_record(header.iter().map(|key| row.get(key).unwrap_or("")))?;
        }

        writer.into_inner().map_err(|e| AppError::Io(e.into_error()))
    }

    /// Parse CSV bytes into rows keyed by the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);
        let header = reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            let fields = result?;
            rows.push(header.iter().zip(fields.iter()).collect());
        }
        Ok(rows)
    }
}

#[async_trait]
impl DatasetStorage for CsvStorage {
    async fn write_rows(&self, rows: &[Record], dest: &Path) -> Result<()> {
        let bytes = Self::to_bytes(rows)?;
        write_atomic(dest, &bytes).await?;
        log::debug!("Wrote {} rows to {}", rows.len(), dest.display());
        Ok(())
    }

    async fn read_rows(&self, src: &Path) -> Result<Vec<Record>> {
        let bytes = tokio::fs::read(src).await?;
        Self::from_bytes(&bytes)
    }
}
