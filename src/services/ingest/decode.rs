/// Decode entry bytes as UTF-8, dropping a leading BOM.
///
/// Malformed UTF-8 is logged and the entry skipped.
pub fn decode_entry(path: &str, bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        log::warn!("Skipping entry with invalid UTF-8: {path}");
        return None;
    }
    Some(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entry_strips_bom() {
        let bytes = [&[0xEF, 0xBB, 0xBF][..], b"{}"].concat();
        assert_eq!(decode_entry("a.json", &bytes).as_deref(), Some("{}"));
    }

    #[test]
    fn test_decode_entry_rejects_invalid_utf8() {
        assert_eq!(decode_entry("a.json", &[0x7B, 0xFF, 0xFE, 0x7D]), None);
    }
}
