//! Shared application state.

use std::path::PathBuf;

use crate::audit::AuditLog;

pub struct AppState {
    /// Root under which session directories and the audit log live.
    pub work_dir: PathBuf,
    pub audit: AuditLog,
}

impl AppState {
    pub fn new(work_dir: PathBuf) -> std::io::Result<AppState> {
        std::fs::create_dir_all(&work_dir)?;
        let audit = AuditLog::new(&work_dir);
        Ok(AppState { work_dir, audit })
    }
}
