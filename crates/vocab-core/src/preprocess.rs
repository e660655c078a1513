/// Fold a looked-up word into dictionary key form
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}

/// Flatten a definition onto a single line.
///
/// Line breaks become spaces, then every whitespace run collapses to one
/// space and the ends are trimmed. Applying it twice changes nothing.
pub fn sanitize_definition(definition: &str) -> String {
    definition
        .replace(['\n', '\r'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
