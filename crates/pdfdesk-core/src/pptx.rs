//! PDF to PowerPoint conversion.
//!
//! One slide per source page. The deck is sized from the first page's
//! MediaBox aspect ratio at a fixed 8-inch slide width, and each slide
//! carries the page's extracted text in a full-bleed text box. Emits a
//! minimal PresentationML package with a stub master and layout.

use crate::archive::zip_entries;
use crate::error::PdfDeskError;
use crate::inspect::{extract_page_text, page_sizes};
use crate::ooxml::{escape, EMU_PER_INCH};

/// Decks are emitted at a fixed 8-inch slide width.
const SLIDE_WIDTH_EMU: i64 = 8 * EMU_PER_INCH;

const XMLNS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

/// Convert a PDF into a .pptx slide deck, one slide per page.
pub fn pdf_to_pptx(bytes: &[u8]) -> Result<Vec<u8>, PdfDeskError> {
    let texts = extract_page_text(bytes)?;
    let sizes = page_sizes(bytes)?;
    if texts.is_empty() {
        return Err(PdfDeskError::ConvertError("Document has no pages".into()));
    }

    let (page_w, page_h) = sizes.first().copied().unwrap_or((612.0, 792.0));
    let slide_cx = SLIDE_WIDTH_EMU;
    let slide_cy = (slide_cx as f64 * page_h as f64 / page_w as f64).round() as i64;

    let mut parts = vec![
        part("[Content_Types].xml", &content_types_xml(texts.len())),
        part("_rels/.rels", ROOT_RELS),
        part(
            "ppt/presentation.xml",
            &presentation_xml(texts.len(), slide_cx, slide_cy),
        ),
        part(
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(texts.len()),
        ),
        part("ppt/slideMasters/slideMaster1.xml", &master_xml()),
        part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &master_rels_xml(),
        ),
        part("ppt/theme/theme1.xml", &theme_xml()),
        part("ppt/slideLayouts/slideLayout1.xml", &layout_xml()),
        part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &layout_rels_xml(),
        ),
    ];

    for (i, text) in texts.iter().enumerate() {
        let n = i + 1;
        parts.push(part(
            &format!("ppt/slides/slide{}.xml", n),
            &slide_xml(text, slide_cx, slide_cy),
        ));
        parts.push(part(
            &format!("ppt/slides/_rels/slide{}.xml.rels", n),
            &slide_rels_xml(),
        ));
    }

    zip_entries(&parts)
}

fn part(name: &str, xml: &str) -> (String, Vec<u8>) {
    (name.to_string(), xml.as_bytes().to_vec())
}

fn content_types_xml(slides: usize) -> String {
    let mut overrides = String::from(
        r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
    );
    for n in 1..=slides {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            n
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            "{}</Types>"
        ),
        overrides
    )
}

fn presentation_xml(slides: usize, cx: i64, cy: i64) -> String {
    let mut slide_ids = String::new();
    for n in 1..=slides {
        // rId1 is the master; slides start at rId2.
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            255 + n,
            1 + n
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:presentation {}>"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
            r#"<p:sldIdLst>{}</p:sldIdLst>"#,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            r#"<p:notesSz cx="6858000" cy="9144000"/>"#,
            "</p:presentation>"
        ),
        XMLNS, slide_ids, cx, cy
    )
}

fn presentation_rels_xml(slides: usize) -> String {
    let mut rels = String::from(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );
    for n in 1..=slides {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            1 + n,
            n
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#
        ),
        rels
    )
}

fn master_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:sldMaster {}>"#,
            "<p:cSld><p:spTree>",
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
            "</p:spTree></p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        XMLNS
    )
}

fn master_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
        "</Relationships>"
    )
    .to_string()
}

/// A bare Office-default theme. PowerPoint expects the slide master to
/// resolve a theme part; without one some versions run their repair flow
/// on open.
fn theme_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="pdfdesk">"#,
        "<a:themeElements>",
        r#"<a:clrScheme name="pdfdesk">"#,
        r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
        r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
        r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#,
        r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
        r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#,
        r#"<a:accent2><a:srgbClr val="ED7D31"/></a:accent2>"#,
        r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>"#,
        r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
        r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#,
        r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
        r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#,
        r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
        "</a:clrScheme>",
        r#"<a:fontScheme name="pdfdesk">"#,
        r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
        r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
        "</a:fontScheme>",
        r#"<a:fmtScheme name="pdfdesk">"#,
        r#"<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>"#,
        r#"<a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#,
        r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#,
        r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#,
        "</a:fmtScheme>",
        "</a:themeElements>",
        "</a:theme>"
    )
    .to_string()
}

fn layout_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:sldLayout {}>"#,
            "<p:cSld><p:spTree>",
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
            "</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>"
        ),
        XMLNS
    )
}

fn layout_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
        "</Relationships>"
    )
    .to_string()
}

fn slide_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
        "</Relationships>"
    )
    .to_string()
}

fn slide_xml(text: &str, cx: i64, cy: i64) -> String {
    let mut paragraphs = String::new();
    for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
        paragraphs.push_str("<a:p><a:r><a:t>");
        paragraphs.push_str(&escape(line));
        paragraphs.push_str("</a:t></a:r></a:p>");
    }
    if paragraphs.is_empty() {
        paragraphs.push_str("<a:p><a:endParaRPr/></a:p>");
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<p:sld {}>"#,
            "<p:cSld><p:spTree>",
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
            "<p:sp>",
            r#"<p:nvSpPr><p:cNvPr id="2" name="Page Text"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>{}</p:txBody>"#,
            "</p:sp>",
            "</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sld>"
        ),
        XMLNS, cx, cy, paragraphs
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testpdf;
    use std::io::{Cursor, Read};

    fn part_names(package: &[u8]) -> Vec<String> {
        let archive = zip::ZipArchive::new(Cursor::new(package.to_vec())).unwrap();
        archive.file_names().map(String::from).collect()
    }

    #[test]
    fn one_slide_per_page() {
        let pdf = testpdf::with_pages(4, "Deck");
        let pptx = pdf_to_pptx(&pdf).unwrap();

        assert!(pptx.starts_with(b"PK"));
        let names = part_names(&pptx);
        let slides = names
            .iter()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml") && !n.contains("_rels"))
            .count();
        assert_eq!(slides, 4);
    }

    #[test]
    fn package_has_presentation_skeleton() {
        let pdf = testpdf::with_pages(1, "Skel");
        let pptx = pdf_to_pptx(&pdf).unwrap();

        let names = part_names(&pptx);
        for required in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
        ] {
            assert!(names.iter().any(|n| n == required), "missing {}", required);
        }
    }

    #[test]
    fn master_links_layout_and_theme() {
        let pdf = testpdf::with_pages(1, "Theme");
        let pptx = pdf_to_pptx(&pdf).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(pptx)).unwrap();
        let mut rels = String::new();
        archive
            .by_name("ppt/slideMasters/_rels/slideMaster1.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();

        assert!(rels.contains("relationships/slideLayout"));
        assert!(rels.contains(r#"Target="../theme/theme1.xml""#));

        let mut types = String::new();
        archive
            .by_name("[Content_Types].xml")
            .unwrap()
            .read_to_string(&mut types)
            .unwrap();
        assert!(types.contains("officedocument.theme+xml"));
    }

    #[test]
    fn slide_size_follows_page_aspect_ratio() {
        // US Letter portrait: 612x792 -> taller than wide.
        let pdf = testpdf::with_pages(1, "Aspect");
        let pptx = pdf_to_pptx(&pdf).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(pptx)).unwrap();
        let mut presentation = String::new();
        archive
            .by_name("ppt/presentation.xml")
            .unwrap()
            .read_to_string(&mut presentation)
            .unwrap();

        let expected_cy = (SLIDE_WIDTH_EMU as f64 * (792.0 / 612.0)).round() as i64;
        assert!(presentation.contains(&format!(r#"<p:sldSz cx="{}" cy="{}"/>"#, SLIDE_WIDTH_EMU, expected_cy)));
    }

    #[test]
    fn rejects_invalid_pdf() {
        assert!(pdf_to_pptx(b"not-a-pdf").is_err());
    }

    #[test]
    fn slide_text_is_escaped() {
        let xml = slide_xml("R&D <plan>", 100, 100);
        assert!(xml.contains("R&amp;D &lt;plan&gt;"));
    }
}
