use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::binding::UploadBinding;
use super::reconciler::{ReferenceError, ReferenceSource};

/// Reference filenames loaded from a CSV manifest exported from the
/// relational store (`table,column,filename` per row).
///
/// The sweep runs outside the request path, so the manifest stands in for a
/// live database connection: an operator exports the bound columns and feeds
/// the file to `sweep`.
pub struct ManifestReferences {
    by_binding: HashMap<(String, String), BTreeSet<String>>,
}

impl ManifestReferences {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ManifestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut by_binding: HashMap<(String, String), BTreeSet<String>> = HashMap::new();
        for record in csv_reader.deserialize::<ManifestRow>() {
            let row = record?;
            // Empty filenames mirror NULL/'' column values and never count
            // as references.
            if row.filename.is_empty() {
                continue;
            }
            by_binding
                .entry((row.table, row.column))
                .or_default()
                .insert(row.filename);
        }

        Ok(Self { by_binding })
    }

    pub fn is_empty(&self) -> bool {
        self.by_binding.is_empty()
    }
}

impl ReferenceSource for ManifestReferences {
    fn referenced_filenames(
        &self,
        binding: &UploadBinding,
    ) -> Result<BTreeSet<String>, ReferenceError> {
        Ok(self
            .by_binding
            .get(&(binding.table.clone(), binding.column.clone()))
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    table: String,
    column: String,
    filename: String,
}

/// Error raised while loading a reference manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("unable to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed manifest: {0}")]
    Csv(#[from] csv::Error),
}
