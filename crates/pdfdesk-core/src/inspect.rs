//! Read-only document inspection: page counts, page geometry, text content.

use crate::error::PdfDeskError;
use lopdf::{Document, Object};

/// US Letter in PDF points, used when a page carries no MediaBox.
const LETTER: (f32, f32) = (612.0, 792.0);

/// Number of pages in the document.
pub fn page_count(bytes: &[u8]) -> Result<u32, PdfDeskError> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfDeskError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

/// Width/height in points for every page, in page order.
///
/// The MediaBox may be inherited from an ancestor Pages node; pages with no
/// resolvable MediaBox report US Letter.
pub fn page_sizes(bytes: &[u8]) -> Result<Vec<(f32, f32)>, PdfDeskError> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfDeskError::ParseError(e.to_string()))?;

    let sizes = doc
        .get_pages()
        .into_values()
        .map(|page_id| media_box(&doc, page_id).unwrap_or(LETTER))
        .collect();
    Ok(sizes)
}

/// Text content per page, padded with empty strings up to the page count.
///
/// Extraction quality is pdf-extract's business; a document it cannot read
/// degrades to empty pages instead of failing the whole conversion.
pub fn extract_page_text(bytes: &[u8]) -> Result<Vec<String>, PdfDeskError> {
    let total = page_count(bytes)? as usize;

    let mut pages = pdf_extract::extract_text_from_mem_by_pages(bytes).unwrap_or_default();
    pages.truncate(total);
    pages.resize(total, String::new());

    Ok(pages)
}

/// Resolve the effective MediaBox for a page, walking the Parent chain for
/// inherited values.
fn media_box(doc: &Document, page_id: lopdf::ObjectId) -> Option<(f32, f32)> {
    let mut current = page_id;

    // Parent chains are shallow in practice; the cap guards against cycles.
    for _ in 0..16 {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;

        if let Ok(bounds) = dict.get(b"MediaBox").and_then(Object::as_array) {
            return rect_size(bounds);
        }

        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => return None,
        }
    }
    None
}

fn rect_size(bounds: &[Object]) -> Option<(f32, f32)> {
    if bounds.len() != 4 {
        return None;
    }
    let n: Vec<f32> = bounds.iter().filter_map(number).collect();
    if n.len() != 4 {
        return None;
    }

    let width = (n[2] - n[0]).abs();
    let height = (n[3] - n[1]).abs();
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some((width, height))
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
