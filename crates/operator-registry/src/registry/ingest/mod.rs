//! Boundary between the regulator's CSV export and the typed [`Operator`] model.
//!
//! Per-cell problems never abort an import: blank cells become `None`, unknown
//! labels fall back to `Other`, and unparseable dates are dropped and counted.
//! Only I/O failures and structurally broken CSV are errors.

mod normalizer;
mod parser;

use crate::registry::domain::Operator;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RegistryImportError {
    #[error("failed to read operator export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid operator CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads operator snapshots in the regulator's semicolon-separated layout.
#[derive(Debug, Clone, Copy)]
pub struct RegistryImporter {
    delimiter: u8,
}

impl Default for RegistryImporter {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl RegistryImporter {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<Operator>, RegistryImportError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<Operator>, RegistryImportError> {
        let export = parser::parse_records(reader, self.delimiter)?;
        if export.malformed_dates > 0 {
            tracing::warn!(
                count = export.malformed_dates,
                "registration dates could not be parsed; those operators are scored without tenure"
            );
        }
        Ok(export.operators)
    }
}
