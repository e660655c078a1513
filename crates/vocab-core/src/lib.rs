pub mod dictionary;
pub mod join;
pub mod preprocess;

pub use dictionary::{Dictionary, DictionaryLoad, JsonDictionaryLoader, LoadError};
pub use join::{attach_definitions, retain_defined};
pub use preprocess::{normalize_word, sanitize_definition};
