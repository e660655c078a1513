use std::fs;
use std::path::{Path, PathBuf};

use vocab_types::VocabularyTable;

/// Lets spreadsheet tools and Anki detect UTF-8
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Render the header and every record as BOM-prefixed CSV
pub fn render_csv(table: &VocabularyTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(table.header())?;
    for record in table.records() {
        writer.write_record(record.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}

/// Write the table to `path`, creating missing parent directories.
/// An existing file is overwritten.
pub fn export_csv(table: &VocabularyTable, path: &Path) -> Result<(), ExportError> {
    let bytes = render_csv(table)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render CSV")]
    Csv(#[from] csv::Error),
}
