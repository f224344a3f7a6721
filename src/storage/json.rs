// src/storage/json.rs

//! JSON dataset backend.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Record;
use crate::storage::{DatasetStorage, write_atomic};

/// Pretty-printed JSON array of flat objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStorage;

#[async_trait]
impl DatasetStorage for JsonStorage {
    async fn write_rows(&self, rows: &[Record], dest: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(rows)?;
        write_atomic(dest, &bytes).await?;
        log::debug!("Wrote {} rows to {}", rows.len(), dest.display());
        Ok(())
    }

    async fn read_rows(&self, src: &Path) -> Result<Vec<Record>> {
        let bytes = tokio::fs::read(src).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
