//! Multipart form parsing for the convert endpoint.

use axum::extract::Multipart;

use crate::error::ServerError;

pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// One single-page PDF per page, delivered as a ZIP.
    #[default]
    Pages,
    /// Extract a page range into one PDF.
    Range,
}

pub struct ConvertForm {
    pub tool_id: String,
    pub files: Vec<UploadedFile>,
    pub split_mode: SplitMode,
    pub pages: Option<String>,
}

/// Read the upload form: `tool_id`, one or more `files[]` entries, and the
/// split options.
pub async fn parse_convert_form(mut multipart: Multipart) -> Result<ConvertForm, ServerError> {
    let mut tool_id: Option<String> = None;
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut split_mode = SplitMode::default();
    let mut pages: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "tool_id" => {
                let value = field.text().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("Failed to read tool_id: {}", e))
                })?;
                tool_id = Some(value);
            }
            "files[]" | "files" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        ServerError::InvalidRequest(format!("Failed to read file data: {}", e))
                    })?
                    .to_vec();

                // Browsers submit an empty part when no file was picked.
                if data.is_empty() {
                    continue;
                }
                if !data.starts_with(b"%PDF-") {
                    return Err(ServerError::InvalidRequest(format!(
                        "'{}' does not look like a PDF",
                        filename
                    )));
                }

                files.push(UploadedFile { filename, data });
            }
            "split_mode" => {
                let value = field.text().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("Failed to read split_mode: {}", e))
                })?;
                split_mode = match value.as_str() {
                    "" | "pages" => SplitMode::Pages,
                    "range" => SplitMode::Range,
                    other => {
                        return Err(ServerError::InvalidRequest(format!(
                            "Unknown split mode '{}'",
                            other
                        )))
                    }
                };
            }
            "pages" => {
                let value = field.text().await.map_err(|e| {
                    ServerError::InvalidRequest(format!("Failed to read pages: {}", e))
                })?;
                if !value.trim().is_empty() {
                    pages = Some(value);
                }
            }
            _ => {
                // Ignore unknown fields.
                let _ = field.bytes().await;
            }
        }
    }

    let tool_id = tool_id
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("Missing tool_id".into()))?;

    if files.is_empty() {
        return Err(ServerError::InvalidRequest("No files selected.".into()));
    }

    Ok(ConvertForm {
        tool_id,
        files,
        split_mode,
        pages,
    })
}
