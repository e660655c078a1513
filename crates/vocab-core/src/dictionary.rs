use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use vocab_types::NO_DEFINITION;

use crate::preprocess::{normalize_word, sanitize_definition};

/// Word to definition mapping keyed by lowercase word
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw entries, folding keys to lowercase.
    ///
    /// When several keys fold to the same word, a key that was already
    /// lowercase wins; otherwise the first one seen is kept.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut folded: HashMap<String, String> = HashMap::new();

        for (word, definition) in entries {
            let key = normalize_word(&word);
            if key == word {
                folded.insert(key, definition);
            } else {
                folded.entry(key).or_insert(definition);
            }
        }

        Self { entries: folded }
    }

    /// Exact lookup after case folding
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&normalize_word(word)).map(String::as_str)
    }

    /// Sanitized definition, or the "not found" placeholder
    pub fn definition_for(&self, word: &str) -> String {
        match self.lookup(word) {
            Some(definition) => sanitize_definition(definition),
            None => NO_DEFINITION.to_string(),
        }
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a soft dictionary load
#[derive(Debug)]
pub enum DictionaryLoad {
    Loaded(Dictionary),
    Failed(LoadError),
}

impl DictionaryLoad {
    pub fn into_result(self) -> Result<Dictionary, LoadError> {
        match self {
            DictionaryLoad::Loaded(dictionary) => Ok(dictionary),
            DictionaryLoad::Failed(e) => Err(e),
        }
    }
}

/// Loads flat JSON dictionaries: `{ "word": "definition", ... }`
pub struct JsonDictionaryLoader;

impl JsonDictionaryLoader {
    /// Load dictionary from file path. The whole file parses or nothing is returned.
    pub fn load_from_file(path: &Path) -> Result<Dictionary, LoadError> {
        tracing::info!("Loading dictionary from file: {}", path.display());

        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let json = std::fs::read_to_string(path)?;
        let dictionary = Self::from_json(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", dictionary.entry_count());
        Ok(dictionary)
    }

    /// Parse a dictionary from a JSON string
    pub fn from_json(json: &str) -> Result<Dictionary, LoadError> {
        // Sorted so key collisions resolve the same way on every run
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Dictionary::from_entries(entries))
    }

    /// Like `load_from_file`, but logs the failure instead of returning it as an error
    pub fn load(path: &Path) -> DictionaryLoad {
        match Self::load_from_file(path) {
            Ok(dictionary) => DictionaryLoad::Loaded(dictionary),
            Err(e) => {
                match std::error::Error::source(&e) {
                    Some(cause) => {
                        tracing::error!("Error loading dictionary {}: {}: {}", path.display(), e, cause)
                    }
                    None => tracing::error!("Error loading dictionary {}: {}", path.display(), e),
                }
                DictionaryLoad::Failed(e)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid dictionary JSON")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read dictionary")]
    Io(#[from] std::io::Error),
}
