//! Append-only CSV audit log: one row per convert request.
//!
//! Audit failures are logged and swallowed; writing the log must never fail
//! a request.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct AuditRecord<'a> {
    timestamp: String,
    tool: &'a str,
    status: &'a str,
    message: &'a str,
}

pub struct AuditLog {
    path: PathBuf,
    // Serializes appends so concurrent requests cannot interleave rows.
    lock: Mutex<()>,
}

impl AuditLog {
    pub fn new(work_root: &Path) -> AuditLog {
        AuditLog {
            path: work_root.join("audit.csv"),
            lock: Mutex::new(()),
        }
    }

    pub fn success(&self, tool: &str, message: &str) {
        self.record(tool, "success", message);
    }

    pub fn error(&self, tool: &str, message: &str) {
        self.record(tool, "error", message);
    }

    fn record(&self, tool: &str, status: &str, message: &str) {
        let row = AuditRecord {
            timestamp: Utc::now().to_rfc3339(),
            tool,
            status,
            message,
        };
        if let Err(e) = self.append(&row) {
            tracing::warn!("Audit log write failed: {}", e);
        }
    }

    fn append(&self, row: &AuditRecord<'_>) -> anyhow::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_rows_with_a_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path());

        log.success("pdf-merger", "Merged 2 files");
        log.error("split-pdf", "Failed to parse PDF: broken");

        let content = std::fs::read_to_string(dir.path().join("audit.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,tool,status,message");
        assert!(lines[1].contains("pdf-merger,success,Merged 2 files"));
        assert!(lines[2].contains("split-pdf,error,"));
    }

    #[test]
    fn quotes_messages_containing_commas() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path());

        log.success("pdf-to-word", "Converted report.pdf, 3 pages");

        let content = std::fs::read_to_string(dir.path().join("audit.csv")).unwrap();
        assert!(content.contains("\"Converted report.pdf, 3 pages\""));
    }
}
