//! Request-scoped working directories.
//!
//! Every convert request gets a fresh UUID-named directory under the work
//! root, with `in/` for the uploaded files and `out/` for the produced
//! artifacts. The invariant: unique per request, removed entirely on error,
//! inputs discarded on success so only downloadable artifacts remain.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

pub struct Session {
    id: String,
    root: PathBuf,
}

impl Session {
    /// Create a new session directory tree under `work_root`.
    pub fn create(work_root: &Path) -> std::io::Result<Session> {
        let id = Uuid::new_v4().to_string();
        let root = work_root.join(&id);
        fs::create_dir_all(root.join("in"))?;
        fs::create_dir_all(root.join("out"))?;
        Ok(Session { id, root })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Persist an uploaded file under `in/` with a sanitized name.
    pub fn save_input(&self, filename: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let name = sanitize_filename(filename).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Unusable filename: {:?}", filename),
            )
        })?;
        let path = self.root.join("in").join(name);
        fs::write(&path, data)?;
        Ok(path)
    }

    /// Write a produced artifact under `out/` and return its final name.
    pub fn write_output(&self, filename: &str, data: &[u8]) -> std::io::Result<String> {
        let name = sanitize_filename(filename).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Unusable filename: {:?}", filename),
            )
        })?;
        fs::write(self.root.join("out").join(&name), data)?;
        Ok(name)
    }

    /// Drop the uploaded inputs once an operation has succeeded.
    pub fn discard_inputs(&self) {
        if let Err(e) = fs::remove_dir_all(self.root.join("in")) {
            tracing::warn!("Failed to remove session inputs {}: {}", self.id, e);
        }
    }

    /// Remove the whole session directory (the error path).
    pub fn remove(&self) {
        if let Err(e) = fs::remove_dir_all(&self.root) {
            tracing::warn!("Failed to remove session {}: {}", self.id, e);
        }
    }
}

/// Reduce an uploaded filename to a safe basename: last path component,
/// control characters stripped, no dot-only names. Returns None when
/// nothing safe remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let basename = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>();

    let trimmed = basename.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return None;
    }
    Some(trimmed.to_string())
}

/// The stem of an uploaded filename, for deriving output names.
pub fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
