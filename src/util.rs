//! Byte decoding and file name helpers.

use std::borrow::Cow;
use std::path::Path;

/// Decode chapter bytes to a string.
///
/// UTF-8 is tried first (a BOM is stripped by encoding_rs). Malformed input is
/// decoded with the encoding named in the `<?xml encoding="..."?>`
/// declaration, and failing that as Windows-1252, which is what older ePub
/// exports tend to use.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = extract_xml_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the encoding label in an XML declaration.
///
/// Only the first 100 bytes are inspected. Returns `None` when there is no
/// declaration or it carries no `encoding` pseudo-attribute.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(100)];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let (&quote, rest) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = rest.iter().position(|&b| b == quote)?;
    std::str::from_utf8(&rest[..value_end]).ok()
}

/// Check whether a file name ends in `.{extension}`.
///
/// The extension is given without the dot. Matching is case-sensitive, so
/// `chapter.HTML` does not count as `html`.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(extension))
        .is_some_and(|stem| stem.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Génesis".as_bytes()), "Génesis");
    }

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = b"\xEF\xBB\xBF<h3>Exodus</h3>";
        assert_eq!(decode_text(bytes), "<h3>Exodus</h3>");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte
        let bytes = b"<h3>G\xE9nesis</h3>";
        assert_eq!(decode_text(bytes), "<h3>Génesis</h3>");
    }

    #[test]
    fn test_decode_uses_declared_encoding() {
        // 0xE6 is 'ć' in ISO-8859-2 but 'æ' in Windows-1252
        let bytes = b"<?xml version=\"1.0\" encoding=\"iso-8859-2\"?><h3>\xE6</h3>";
        assert!(decode_text(bytes).contains("<h3>ć</h3>"));
    }

    #[test]
    fn test_extract_xml_encoding() {
        assert_eq!(
            extract_xml_encoding(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>"),
            Some("UTF-8")
        );
        assert_eq!(
            extract_xml_encoding(b"<?xml version='1.0' encoding='windows-1252'?>"),
            Some("windows-1252")
        );
        assert_eq!(extract_xml_encoding(b"<?xml version=\"1.0\"?>"), None);
        assert_eq!(extract_xml_encoding(b"<html></html>"), None);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("OPS/ch01.html"), "html"));
        assert!(has_extension(Path::new("ch01.xhtml"), "xhtml"));
        assert!(!has_extension(Path::new("ch01.xhtml"), "html"));
        assert!(!has_extension(Path::new("html"), "html"));
        assert!(!has_extension(Path::new("style.css"), "html"));
    }
}
