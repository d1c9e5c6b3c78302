//! ZIP packaging for multi-file outputs.

use crate::error::PdfDeskError;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Pack the named entries into a deflate-compressed ZIP archive.
pub fn zip_entries(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, PdfDeskError> {
    if entries.is_empty() {
        return Err(PdfDeskError::ArchiveError("Nothing to archive".into()));
    }

    let mut seen = HashSet::new();
    for (name, _) in entries {
        if !seen.insert(name.as_str()) {
            return Err(PdfDeskError::ArchiveError(format!(
                "Duplicate archive entry: {}",
                name
            )));
        }
    }

    let mut buffer = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, data) in entries {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| PdfDeskError::ArchiveError(format!("ZIP entry failed: {}", e)))?;
            writer
                .write_all(data)
                .map_err(|e| PdfDeskError::ArchiveError(format!("ZIP write failed: {}", e)))?;
        }

        writer
            .finish()
            .map_err(|e| PdfDeskError::ArchiveError(format!("ZIP finalize failed: {}", e)))?;
    }

    Ok(buffer)
}
