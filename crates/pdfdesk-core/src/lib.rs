//! PDF document operations for the pdfdesk tool suite.
//!
//! Everything here works on in-memory byte buffers; file placement and
//! session handling live in the server app. The heavy lifting is delegated
//! to lopdf (document surgery) and pdf-extract (text content); the Office
//! output formats are minimal OOXML packages written with the zip crate.

pub mod archive;
pub mod docx;
pub mod error;
pub mod inspect;
pub mod merge;
pub mod pptx;
pub mod split;

mod ooxml;

pub use archive::zip_entries;
pub use docx::pdf_to_docx;
pub use error::PdfDeskError;
pub use inspect::{extract_page_text, page_count, page_sizes};
pub use merge::merge_documents;
pub use pptx::pdf_to_pptx;
pub use split::{extract_pages, split_into_pages};

/// Upper bound on how many pages one range expression may name. No real
/// document handled here comes near it; it exists so a request cannot ask
/// for billions of pages and have them all allocated.
pub const MAX_RANGE_PAGES: usize = 10_000;

/// Parse a page range expression like "1-3, 5, 8-10" into sorted unique
/// 1-indexed page numbers.
///
/// Expressions naming more than [`MAX_RANGE_PAGES`] pages are rejected
/// before anything is materialized.
pub fn parse_ranges(input: &str) -> Result<Vec<u32>, PdfDeskError> {
    use std::collections::BTreeSet;

    let mut pages = BTreeSet::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (first, last) = parse_range_part(part)?;

        let span = u64::from(last - first) + 1;
        if pages.len() as u64 + span > MAX_RANGE_PAGES as u64 {
            return Err(PdfDeskError::InvalidRange(format!(
                "Expression names more than {} pages",
                MAX_RANGE_PAGES
            )));
        }

        pages.extend(first..=last);
    }

    Ok(pages.into_iter().collect())
}

/// Parse one comma-separated piece: either a single page ("5") or an
/// inclusive range ("2-4").
fn parse_range_part(part: &str) -> Result<(u32, u32), PdfDeskError> {
    let parse_num = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| PdfDeskError::InvalidRange(format!("Not a page number: '{}'", s.trim())))
    };

    match part.split_once('-') {
        Some((start, end)) => {
            let start = parse_num(start)?;
            let end = parse_num(end)?;
            if start > end {
                return Err(PdfDeskError::InvalidRange(format!(
                    "Range {}-{} is backwards",
                    start, end
                )));
            }
            Ok((start, end))
        }
        None => {
            let page = parse_num(part)?;
            Ok((page, page))
        }
    }
}

/// Test-only PDF builders shared by the operation modules.
#[cfg(test)]
pub(crate) mod testpdf {
    use lopdf::{dictionary, Dictionary, Document, Object, Stream};

    /// Build a simple valid PDF with `num_pages` pages of US Letter size,
    /// each carrying a short identifiable text stream.
    pub fn with_pages(num_pages: u32, label: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        });

        let mut kids = Vec::new();
        for n in 0..num_pages {
            let content = format!("BT /F1 12 Tf 72 720 Td ({}-{}) Tj ET", label, n + 1);
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => Object::Reference(resources_id),
                "Contents" => Object::Reference(content_id),
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => num_pages as i64,
                "Kids" => kids,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_ranges_single_page() {
        assert_eq!(parse_ranges("7").unwrap(), vec![7]);
    }

    #[test]
    fn parse_ranges_simple_range() {
        assert_eq!(parse_ranges("2-5").unwrap(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn parse_ranges_mixed_with_whitespace() {
        assert_eq!(parse_ranges(" 1-3 , 5, 8-9 ").unwrap(), vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn parse_ranges_overlaps_deduplicate() {
        assert_eq!(parse_ranges("1-4, 3-6").unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn parse_ranges_rejects_backwards() {
        assert!(parse_ranges("5-2").is_err());
    }

    #[test]
    fn parse_ranges_rejects_garbage() {
        assert!(parse_ranges("1-x").is_err());
        assert!(parse_ranges("abc").is_err());
    }

    #[test]
    fn parse_ranges_rejects_spans_above_the_cap() {
        assert!(parse_ranges("1-20000000").is_err());
        assert!(parse_ranges("1-4294967295").is_err());
        // Several parts add up against the same cap.
        assert!(parse_ranges("1-9000, 20000-22000").is_err());
    }

    #[test]
    fn parse_ranges_accepts_a_span_at_the_cap() {
        let pages = parse_ranges(&format!("1-{}", MAX_RANGE_PAGES)).unwrap();
        assert_eq!(pages.len(), MAX_RANGE_PAGES);
    }

    #[test]
    fn parse_ranges_empty_input_is_empty() {
        assert_eq!(parse_ranges("").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_ranges(" , ,").unwrap(), Vec::<u32>::new());
    }

    proptest! {
        /// Any well-formed range expression parses to an ascending,
        /// duplicate-free list covering exactly the requested pages.
        #[test]
        fn ranges_parse_sorted_and_unique(start in 1u32..200, len in 0u32..50, extra in 1u32..200) {
            let expr = format!("{}-{}, {}", start, start + len, extra);
            let pages = parse_ranges(&expr).unwrap();

            prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
            for p in start..=start + len {
                prop_assert!(pages.contains(&p));
            }
            prop_assert!(pages.contains(&extra));
        }

        /// Order of comma-separated parts never changes the result.
        #[test]
        fn ranges_order_insensitive(a in 1u32..100, b in 1u32..100) {
            let forward = parse_ranges(&format!("{}, {}", a, b)).unwrap();
            let reversed = parse_ranges(&format!("{}, {}", b, a)).unwrap();
            prop_assert_eq!(forward, reversed);
        }
    }
}
