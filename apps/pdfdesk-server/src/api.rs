//! API handlers: tool catalog, convert dispatch, artifact download.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use pdfdesk_core as ops;

use crate::error::ServerError;
use crate::session::{file_stem, sanitize_filename, Session};
use crate::state::AppState;
use crate::tools::{Tool, ToolInfo};
use crate::upload::{parse_convert_form, ConvertForm, SplitMode};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "pdfdesk-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Tool catalog response
#[derive(Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolInfo>,
    pub count: usize,
}

/// Handler: GET /api/tools
pub async fn handle_list_tools() -> Json<ToolListResponse> {
    let tools: Vec<ToolInfo> = Tool::ALL.into_iter().map(ToolInfo::from).collect();
    let count = tools.len();
    Json(ToolListResponse { tools, count })
}

/// Convert response consumed by the upload form.
#[derive(Serialize)]
pub struct ConvertResponse {
    pub status: &'static str,
    pub message: String,
    pub download_url: String,
}

/// What a successful tool run leaves behind in the session's out/ dir.
struct Outcome {
    filename: String,
    message: String,
}

/// Handler: POST /api/convert
///
/// Parses the upload form, runs the requested tool in a fresh session
/// directory, and answers with a download link. On any failure the whole
/// session directory is removed before the error is reported.
pub async fn handle_convert(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ConvertResponse>, ServerError> {
    let form = parse_convert_form(multipart).await?;

    let tool = Tool::from_id(&form.tool_id)
        .ok_or_else(|| ServerError::UnknownTool(form.tool_id.clone()))?;

    info!(
        "Convert request: tool={}, files={}",
        tool.id(),
        form.files.len()
    );

    let session = Session::create(&state.work_dir)?;

    match run_tool(tool, &form, &session) {
        Ok(outcome) => {
            session.discard_inputs();
            state.audit.success(tool.id(), &outcome.message);
            info!("Session {} complete: {}", session.id(), outcome.message);

            Ok(Json(ConvertResponse {
                status: "success",
                download_url: format!("/download/{}/{}", session.id(), outcome.filename),
                message: outcome.message,
            }))
        }
        Err(err) => {
            session.remove();
            state.audit.error(tool.id(), &err.to_string());
            Err(err)
        }
    }
}

/// Dispatch to the library call behind the selected tool.
fn run_tool(tool: Tool, form: &ConvertForm, session: &Session) -> Result<Outcome, ServerError> {
    for file in &form.files {
        session
            .save_input(&file.filename, &file.data)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidInput => ServerError::InvalidRequest(e.to_string()),
                _ => ServerError::Internal(e.to_string()),
            })?;
    }

    match tool {
        Tool::Merge => {
            if form.files.len() < 2 {
                return Err(ServerError::TooFewFiles(2));
            }
            let inputs: Vec<Vec<u8>> = form.files.iter().map(|f| f.data.clone()).collect();
            let merged = ops::merge_documents(inputs)?;

            let filename = session.write_output("merged.pdf", &merged)?;
            Ok(Outcome {
                filename,
                message: format!("Successfully merged {} files.", form.files.len()),
            })
        }

        Tool::Split => {
            let file = &form.files[0];
            match form.split_mode {
                SplitMode::Pages => {
                    let parts = ops::split_into_pages(&file.data)?;
                    let entries: Vec<(String, Vec<u8>)> = parts
                        .into_iter()
                        .enumerate()
                        .map(|(i, data)| (format!("page_{}.pdf", i + 1), data))
                        .collect();
                    let count = entries.len();
                    let zipped = ops::zip_entries(&entries)?;

                    let filename = session.write_output("split_pages.zip", &zipped)?;
                    Ok(Outcome {
                        filename,
                        message: format!("Successfully split the PDF into {} pages.", count),
                    })
                }
                SplitMode::Range => {
                    let expr = form.pages.as_deref().ok_or_else(|| {
                        ServerError::InvalidRequest(
                            "A page range is required for range mode.".into(),
                        )
                    })?;
                    let pages = ops::parse_ranges(expr)?;
                    let extracted = ops::extract_pages(&file.data, &pages)?;

                    let filename = session.write_output("extracted_pages.pdf", &extracted)?;
                    Ok(Outcome {
                        filename,
                        message: format!("Successfully extracted {} pages.", pages.len()),
                    })
                }
            }
        }

        Tool::PdfToWord => {
            let file = &form.files[0];
            let docx = ops::pdf_to_docx(&file.data)?;

            let filename =
                session.write_output(&format!("{}.docx", file_stem(&file.filename)), &docx)?;
            Ok(Outcome {
                filename,
                message: "Successfully converted PDF to Word.".to_string(),
            })
        }

        Tool::PdfToPpt => {
            let file = &form.files[0];
            let pptx = ops::pdf_to_pptx(&file.data)?;

            let filename =
                session.write_output(&format!("{}.pptx", file_stem(&file.filename)), &pptx)?;
            Ok(Outcome {
                filename,
                message: "Successfully converted PDF to PowerPoint.".to_string(),
            })
        }
    }
}

/// Handler: GET /download/:session_id/:filename
///
/// Serves an artifact from a session's out/ directory as an attachment.
/// Anything that is not exactly a server-issued session UUID plus a plain
/// filename inside it is a 404.
pub async fn handle_download(
    State(state): State<Arc<AppState>>,
    Path((session_id, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
    Uuid::parse_str(&session_id).map_err(|_| ServerError::NotFound)?;

    let name = sanitize_filename(&filename).ok_or(ServerError::NotFound)?;
    if name != filename {
        return Err(ServerError::NotFound);
    }

    let path = state.work_dir.join(&session_id).join("out").join(&name);
    let data = tokio::fs::read(&path).await.map_err(|_| ServerError::NotFound)?;

    let disposition = format!("attachment; filename=\"{}\"", name);
    Ok((
        [
            (header::CONTENT_TYPE, content_type(&name).to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}

fn content_type(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        _ => "application/octet-stream",
    }
}
