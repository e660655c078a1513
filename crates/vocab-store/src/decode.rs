/// Decode device text without failing on bad bytes.
///
/// Invalid UTF-8 sequences are dropped and a single leading byte-order
/// mark is stripped. NULL columns read as the empty string.
pub fn decode_lenient(bytes: Option<&[u8]>) -> String {
    let Some(bytes) = bytes else {
        return String::new();
    };

    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
