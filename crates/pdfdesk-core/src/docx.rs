//! PDF to Word conversion.
//!
//! Emits a minimal WordprocessingML package: one paragraph per extracted
//! text line, an explicit page break between source pages. Layout fidelity
//! is out of scope; the point is editable text in page order.

use crate::archive::zip_entries;
use crate::error::PdfDeskError;
use crate::inspect::extract_page_text;
use crate::ooxml::escape;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const PAGE_BREAK: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

/// Convert a PDF into a .docx with the document's text, page by page.
pub fn pdf_to_docx(bytes: &[u8]) -> Result<Vec<u8>, PdfDeskError> {
    let pages = extract_page_text(bytes)?;
    if pages.is_empty() {
        return Err(PdfDeskError::ConvertError("Document has no pages".into()));
    }

    let parts = vec![
        part("[Content_Types].xml", CONTENT_TYPES),
        part("_rels/.rels", ROOT_RELS),
        part("word/document.xml", &document_xml(&pages)),
    ];

    zip_entries(&parts)
}

fn part(name: &str, xml: &str) -> (String, Vec<u8>) {
    (name.to_string(), xml.as_bytes().to_vec())
}

fn document_xml(pages: &[String]) -> String {
    let mut body = String::new();

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            body.push_str(PAGE_BREAK);
        }

        let mut wrote_any = false;
        for line in page.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
            body.push_str(&escape(line));
            body.push_str("</w:t></w:r></w:p>");
            wrote_any = true;
        }

        // A page with no extractable text still occupies a paragraph so the
        // page structure survives into the output.
        if !wrote_any {
            body.push_str("<w:p/>");
        }
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/></w:sectPr></w:body></w:document>"
        ),
        body
    )
}
