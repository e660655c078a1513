/// Column names of the exported sheet, in order
pub const HEADER: [&str; 4] = ["Word", "Usage", "Book", "Definition"];

/// Definition text marking a word the dictionary does not know
pub const NO_DEFINITION: &str = "No definition found.";

/// A single word looked up on the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRecord {
    pub word: String,
    /// Sentence the word was looked up in
    pub usage: String,
    /// Title of the book the lookup came from
    pub book: String,
    /// Unset until definitions are attached
    pub definition: Option<String>,
}

impl LookupRecord {
    pub fn new(word: impl Into<String>, usage: impl Into<String>, book: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            usage: usage.into(),
            book: book.into(),
            definition: None,
        }
    }

    /// True once a real definition (not the placeholder) is attached
    pub fn has_definition(&self) -> bool {
        self.definition
            .as_deref()
            .is_some_and(|definition| definition != NO_DEFINITION)
    }

    /// Row fields in `HEADER` order
    pub fn fields(&self) -> [&str; 4] {
        [
            self.word.as_str(),
            self.usage.as_str(),
            self.book.as_str(),
            self.definition.as_deref().unwrap_or_default(),
        ]
    }
}

/// Ordered lookups plus the fixed header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyTable {
    records: Vec<LookupRecord>,
}

impl VocabularyTable {
    pub fn new(records: Vec<LookupRecord>) -> Self {
        Self { records }
    }

    pub fn header(&self) -> [&'static str; 4] {
        HEADER
    }

    pub fn records(&self) -> &[LookupRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [LookupRecord] {
        &mut self.records
    }

    /// Number of data rows, header excluded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only the records matching `keep`, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&LookupRecord) -> bool) {
        self.records.retain(keep);
    }
}
