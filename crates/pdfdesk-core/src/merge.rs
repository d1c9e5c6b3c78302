//! PDF merge.
//!
//! Concatenates the pages of several documents into one. The first input
//! becomes the destination; every following document has its object IDs
//! shifted past the destination's current maximum before its objects and
//! pages are imported, then the destination page tree is rebuilt flat.

use crate::error::PdfDeskError;
use lopdf::{Document, Object, ObjectId};

/// Merge the given PDFs into a single document, preserving input order.
///
/// An empty input set is an error; a single input is returned untouched.
pub fn merge_documents(mut inputs: Vec<Vec<u8>>) -> Result<Vec<u8>, PdfDeskError> {
    if inputs.is_empty() {
        return Err(PdfDeskError::OperationError(
            "No documents to merge".into(),
        ));
    }
    if inputs.len() == 1 {
        return Ok(inputs.swap_remove(0));
    }

    let mut sources = Vec::with_capacity(inputs.len());
    for (i, bytes) in inputs.iter().enumerate() {
        let doc = Document::load_mem(bytes).map_err(|e| {
            PdfDeskError::ParseError(format!("Document {} is not a valid PDF: {}", i + 1, e))
        })?;
        sources.push(doc);
    }

    let mut dest = sources.remove(0);
    let mut page_ids = ordered_page_ids(&dest);
    let mut next_free = dest.max_id;

    for source in sources {
        let offset = next_free;
        let source_pages = ordered_page_ids(&source);
        next_free = next_free.max(source.max_id + offset);

        // Import every object under a shifted ID so nothing collides with
        // what the destination already holds.
        for (id, object) in source.objects {
            dest.objects
                .insert((id.0 + offset, id.1), shift_references(object, offset));
        }

        page_ids.extend(source_pages.into_iter().map(|id| (id.0 + offset, id.1)));
    }

    dest.max_id = next_free;
    rebuild_page_tree(&mut dest, &page_ids)?;

    dest.prune_objects();
    dest.compress();

    let mut buffer = Vec::new();
    dest.save_to(&mut buffer)
        .map_err(|e| PdfDeskError::OperationError(format!("Failed to save merged PDF: {}", e)))?;
    Ok(buffer)
}

/// Leaf page object IDs in page order.
fn ordered_page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Recursively shift every indirect reference inside an object by `offset`.
fn shift_references(object: Object, offset: u32) -> Object {
    match object {
        Object::Reference((num, gen)) => Object::Reference((num + offset, gen)),
        Object::Array(items) => Object::Array(
            items
                .into_iter()
                .map(|o| shift_references(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = shift_references(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = shift_references(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the destination's page tree root at the merged page list and fix
/// every page's Parent link so imported pages hang off the surviving root.
fn rebuild_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> Result<(), PdfDeskError> {
    let structural = |what: &str| PdfDeskError::OperationError(format!("Malformed PDF: {}", what));

    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| structural("trailer has no Root reference"))?;

    let pages_root_id = doc
        .get_object(catalog_id)
        .and_then(Object::as_dict)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| structural("catalog has no Pages reference"))?;

    match doc.objects.get_mut(&pages_root_id) {
        Some(Object::Dictionary(pages_dict)) => {
            pages_dict.set(
                "Kids",
                page_ids
                    .iter()
                    .map(|&id| Object::Reference(id))
                    .collect::<Vec<_>>(),
            );
            pages_dict.set("Count", page_ids.len() as i64);
        }
        _ => return Err(structural("page tree root is not a dictionary")),
    }

    for &page_id in page_ids {
        if let Some(Object::Dictionary(page_dict)) = doc.objects.get_mut(&page_id) {
            page_dict.set("Parent", Object::Reference(pages_root_id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testpdf;

    #[test]
    fn merge_nothing_fails() {
        assert!(merge_documents(vec![]).is_err());
    }

    #[test]
    fn merge_single_input_passes_through() {
        let pdf = testpdf::with_pages(3, "Only");
        let out = merge_documents(vec![pdf.clone()]).unwrap();
        assert_eq!(out, pdf);
    }

    #[test]
    fn merge_two_documents_sums_pages() {
        let a = testpdf::with_pages(2, "A");
        let b = testpdf::with_pages(3, "B");

        let merged = merge_documents(vec![a, b]).unwrap();
        let doc = Document::load_mem(&merged).unwrap();
        assert_eq!(doc.get_pages().len(), 5);
    }

    #[test]
    fn merge_many_documents_sums_pages() {
        let inputs: Vec<Vec<u8>> = (0..4)
            .map(|i| testpdf::with_pages(i + 1, &format!("Doc{}", i)))
            .collect();

        let merged = merge_documents(inputs).unwrap();
        let doc = Document::load_mem(&merged).unwrap();
        assert_eq!(doc.get_pages().len(), 1 + 2 + 3 + 4);
    }

    #[test]
    fn merge_rejects_non_pdf_input() {
        let good = testpdf::with_pages(1, "Good");
        let result = merge_documents(vec![good, b"not a pdf".to_vec()]);
        assert!(matches!(result, Err(PdfDeskError::ParseError(_))));
    }

    #[test]
    fn merged_pages_parent_the_surviving_root() {
        let a = testpdf::with_pages(1, "A");
        let b = testpdf::with_pages(2, "B");

        let merged = merge_documents(vec![a, b]).unwrap();
        let doc = Document::load_mem(&merged).unwrap();

        let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let pages_root = doc
            .get_object(catalog_id)
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"Pages")
            .unwrap()
            .as_reference()
            .unwrap();

        for (_, page_id) in doc.get_pages() {
            let parent = doc
                .get_object(page_id)
                .unwrap()
                .as_dict()
                .unwrap()
                .get(b"Parent")
                .unwrap()
                .as_reference()
                .unwrap();
            assert_eq!(parent, pages_root);
        }
    }
}
