//! The tool catalog: the four conversions the upload form can request.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Merge,
    Split,
    PdfToWord,
    PdfToPpt,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Merge, Tool::Split, Tool::PdfToWord, Tool::PdfToPpt];

    pub fn from_id(id: &str) -> Option<Tool> {
        match id {
            "pdf-merger" => Some(Tool::Merge),
            "split-pdf" => Some(Tool::Split),
            "pdf-to-word" => Some(Tool::PdfToWord),
            "pdf-to-ppt" => Some(Tool::PdfToPpt),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Tool::Merge => "pdf-merger",
            Tool::Split => "split-pdf",
            Tool::PdfToWord => "pdf-to-word",
            Tool::PdfToPpt => "pdf-to-ppt",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tool::Merge => "PDF Merger",
            Tool::Split => "Split PDF",
            Tool::PdfToWord => "PDF to Word",
            Tool::PdfToPpt => "PDF to PowerPoint",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::Merge => "Combine multiple PDFs into one document.",
            Tool::Split => "Split a single PDF into separate pages.",
            Tool::PdfToWord => "Convert a PDF to an editable .docx file.",
            Tool::PdfToPpt => "Convert a PDF into a .pptx presentation.",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tool::Merge => "\u{1F517}",
            Tool::Split => "\u{2702}\u{FE0F}",
            Tool::PdfToWord => "\u{1F4C4}",
            Tool::PdfToPpt => "\u{1F5BC}\u{FE0F}",
        }
    }

    /// Whether the upload form should offer multiple file selection.
    pub fn accepts_multiple(self) -> bool {
        matches!(self, Tool::Merge)
    }
}

/// Tool metadata as served by GET /api/tools.
#[derive(Serialize)]
pub struct ToolInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub multiple: bool,
}

impl From<Tool> for ToolInfo {
    fn from(tool: Tool) -> Self {
        ToolInfo {
            id: tool.id(),
            title: tool.title(),
            description: tool.description(),
            icon: tool.icon(),
            multiple: tool.accepts_multiple(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_id(tool.id()), Some(tool));
        }
    }

    #[test]
    fn unknown_id_is_none() {
        assert_eq!(Tool::from_id("pdf-to-excel"), None);
        assert_eq!(Tool::from_id(""), None);
    }

    #[test]
    fn only_merge_takes_multiple_files() {
        assert!(Tool::Merge.accepts_multiple());
        assert!(!Tool::Split.accepts_multiple());
        assert!(!Tool::PdfToWord.accepts_multiple());
        assert!(!Tool::PdfToPpt.accepts_multiple());
    }
}
