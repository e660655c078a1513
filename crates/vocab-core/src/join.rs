use vocab_types::{LookupRecord, VocabularyTable};

use crate::dictionary::Dictionary;

/// Attach a definition (or the "not found" placeholder) to every record
pub fn attach_definitions(table: &mut VocabularyTable, dictionary: &Dictionary) {
    for record in table.records_mut() {
        record.definition = Some(dictionary.definition_for(&record.word));
    }
}

/// Drop records without a real definition, keeping order.
/// Returns the number of records dropped.
pub fn retain_defined(table: &mut VocabularyTable) -> usize {
    let before = table.len();
    table.retain(LookupRecord::has_definition);
    let dropped = before - table.len();
    tracing::debug!("Dropped {} lookups without a definition", dropped);
    dropped
}
