//! 曲目目录
//!
//! 从 CSV 加载乐曲片段，按位置编号只读访问。

use rand::Rng;
use std::path::Path;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::CatalogEntry;

/// 每行字段数：作曲家, 标题, 调性, 图片地址
const FIELDS_PER_RECORD: usize = 4;

/// Read-only list of pieces, indexed by load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load the catalog from a headerless CSV file.
    ///
    /// Every row must carry exactly four fields. An empty file is rejected,
    /// since the quiz cannot pick a piece from nothing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut entries = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != FIELDS_PER_RECORD {
                return Err(AppError::Catalog(format!(
                    "{}: record {} has {} fields, expected {}",
                    path.display(),
                    line + 1,
                    record.len(),
                    FIELDS_PER_RECORD
                )));
            }
            entries.push(CatalogEntry::new(
                entries.len(),
                &record[0],
                &record[1],
                &record[2],
                &record[3],
            ));
        }

        let catalog = Self::from_entries(entries)?;
        info!("Loaded {} pieces from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Build a catalog from already-constructed entries, renumbering them by position.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AppError::Catalog("catalog contains no pieces".to_string()));
        }
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(id, entry)| CatalogEntry { id, ..entry })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounds-checked lookup. An out-of-range id is an invariant violation
    /// and maps to a server error for the single request.
    pub fn get(&self, id: usize) -> Result<&CatalogEntry> {
        self.entries.get(id).ok_or(AppError::OutOfRange {
            id,
            len: self.entries.len(),
        })
    }

    /// Pick any piece uniformly at random.
    pub fn random_id<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.entries.len())
    }

    /// Pick a piece other than `last`, uniformly among the rest.
    ///
    /// With a single-piece catalog the only piece is returned again.
    pub fn next_after<R: Rng + ?Sized>(&self, last: usize, rng: &mut R) -> usize {
        let len = self.entries.len();
        if len <= 1 || last >= len {
            return self.random_id(rng);
        }
        let pick = rng.gen_range(0..len - 1);
        if pick >= last { pick + 1 } else { pick }
    }
}
