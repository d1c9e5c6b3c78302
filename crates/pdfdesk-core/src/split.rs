//! PDF split.
//!
//! Both entry points reduce a loaded document to a subset of its pages by
//! deleting everything else, then pruning the orphaned objects.

use crate::error::PdfDeskError;
use lopdf::Document;
use std::collections::HashSet;

/// Split a PDF into one single-page document per page, in page order.
pub fn split_into_pages(bytes: &[u8]) -> Result<Vec<Vec<u8>>, PdfDeskError> {
    let doc = load(bytes)?;
    let total = doc.get_pages().len() as u32;
    if total == 0 {
        return Err(PdfDeskError::OperationError("Document has no pages".into()));
    }

    (1..=total).map(|page| keep_pages(&doc, &[page])).collect()
}

/// Extract the listed 1-indexed pages into a single new PDF.
pub fn extract_pages(bytes: &[u8], pages: &[u32]) -> Result<Vec<u8>, PdfDeskError> {
    if pages.is_empty() {
        return Err(PdfDeskError::InvalidRange("No pages specified".into()));
    }
    if pages.contains(&0) {
        return Err(PdfDeskError::InvalidRange(
            "Page numbers are 1-indexed".into(),
        ));
    }

    let doc = load(bytes)?;
    let total = doc.get_pages().len() as u32;
    if let Some(&bad) = pages.iter().find(|&&p| p > total) {
        return Err(PdfDeskError::InvalidRange(format!(
            "Page {} does not exist (document has {} pages)",
            bad, total
        )));
    }

    keep_pages(&doc, pages)
}

fn load(bytes: &[u8]) -> Result<Document, PdfDeskError> {
    Document::load_mem(bytes).map_err(|e| PdfDeskError::ParseError(e.to_string()))
}

/// Produce a copy of `doc` containing only the requested pages.
fn keep_pages(doc: &Document, pages: &[u32]) -> Result<Vec<u8>, PdfDeskError> {
    let keep: HashSet<u32> = pages.iter().copied().collect();
    let total = doc.get_pages().len() as u32;

    let mut out = doc.clone();

    // Delete back-to-front so page numbers stay stable while we work.
    for page in (1..=total).rev() {
        if !keep.contains(&page) {
            out.delete_pages(&[page]);
        }
    }

    out.prune_objects();
    out.compress();

    let mut buffer = Vec::new();
    out.save_to(&mut buffer)
        .map_err(|e| PdfDeskError::OperationError(format!("Failed to save split PDF: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testpdf;

    #[test]
    fn split_yields_one_document_per_page() {
        let pdf = testpdf::with_pages(4, "Split");
        let parts = split_into_pages(&pdf).unwrap();

        assert_eq!(parts.len(), 4);
        for part in &parts {
            let doc = Document::load_mem(part).unwrap();
            assert_eq!(doc.get_pages().len(), 1);
        }
    }

    #[test]
    fn split_single_page_document() {
        let pdf = testpdf::with_pages(1, "One");
        let parts = split_into_pages(&pdf).unwrap();
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn split_rejects_garbage() {
        assert!(split_into_pages(b"%PDF-oops").is_err());
    }

    #[test]
    fn extract_keeps_requested_pages() {
        let pdf = testpdf::with_pages(6, "Extract");
        let out = extract_pages(&pdf, &[2, 4, 5]).unwrap();

        let doc = Document::load_mem(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn extract_whole_range() {
        let pdf = testpdf::with_pages(3, "All");
        let out = extract_pages(&pdf, &[1, 2, 3]).unwrap();

        let doc = Document::load_mem(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn extract_rejects_empty_list() {
        let pdf = testpdf::with_pages(3, "Empty");
        assert!(matches!(
            extract_pages(&pdf, &[]),
            Err(PdfDeskError::InvalidRange(_))
        ));
    }

    #[test]
    fn extract_rejects_page_zero() {
        let pdf = testpdf::with_pages(3, "Zero");
        assert!(extract_pages(&pdf, &[0]).is_err());
    }

    #[test]
    fn extract_rejects_out_of_range() {
        let pdf = testpdf::with_pages(3, "Range");
        let err = extract_pages(&pdf, &[4]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
