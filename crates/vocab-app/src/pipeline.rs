use std::path::PathBuf;

use vocab_anki::ExportError;
use vocab_config::PipelinePaths;
use vocab_core::{DictionaryLoad, JsonDictionaryLoader, LoadError, attach_definitions, retain_defined};
use vocab_store::{StoreError, VocabStore};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: PathBuf,
    /// Lookups read from the device database
    pub extracted: usize,
    /// Data rows written, header excluded
    pub written: usize,
    /// Lookups without a dictionary definition
    pub dropped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to load the dictionary")]
    DictionaryUnavailable(#[source] LoadError),

    #[error("Dictionary {0} has no entries")]
    EmptyDictionary(PathBuf),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Extract lookups, attach definitions, drop the unknown words, write the CSV.
///
/// Every failure aborts before the output file is touched, except a failed
/// write itself.
pub async fn run(paths: &PipelinePaths) -> Result<RunReport, PipelineError> {
    tracing::info!("Reading lookups from {}", paths.source_db.display());
    let mut table = VocabStore::extract(&paths.source_db).await?;
    let extracted = table.len();

    let dictionary = match JsonDictionaryLoader::load(&paths.dictionary) {
        DictionaryLoad::Loaded(dictionary) if dictionary.is_empty() => {
            tracing::error!("Dictionary {} is empty", paths.dictionary.display());
            return Err(PipelineError::EmptyDictionary(paths.dictionary.clone()));
        }
        DictionaryLoad::Loaded(dictionary) => dictionary,
        DictionaryLoad::Failed(e) => return Err(PipelineError::DictionaryUnavailable(e)),
    };

    attach_definitions(&mut table, &dictionary);
    let dropped = retain_defined(&mut table);
    tracing::info!(
        "{} of {} lookups have a definition",
        table.len(),
        extracted
    );

    vocab_anki::export_csv(&table, &paths.output)?;

    Ok(RunReport {
        output: paths.output.clone(),
        extracted,
        written: table.len(),
        dropped,
    })
}
