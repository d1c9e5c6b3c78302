//! Small shared pieces for writing OOXML packages (.docx/.pptx are ZIP
//! containers full of XML parts).

/// English Metric Units per inch, the coordinate space OOXML drawings use.
pub(crate) const EMU_PER_INCH: i64 = 914_400;

/// Escape text for inclusion in XML content or attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Strip control characters XML 1.0 cannot carry.
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}
