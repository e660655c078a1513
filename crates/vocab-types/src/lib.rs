pub mod types;

pub use types::{HEADER, LookupRecord, NO_DEFINITION, VocabularyTable};
