//! UTF-8 byte order mark handling

pub const BOM: &str = "\u{feff}";

/// Split a leading byte order mark off `text`
///
/// Returns the mark (or `""`) and the source after it. Writing the two
/// back-to-back restores the original file.
pub fn split_bom(text: &str) -> (&'static str, &str) {
    match text.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", text),
    }
}
