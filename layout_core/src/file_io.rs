//! # File I/O Module
//!
//! Session file operations:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: refuse files written by an incompatible schema
//!
//! ## File Format
//!
//! Sessions are saved as `.sld` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use layout_core::file_io::{load_session, save_session};
//! use layout_core::session::DesignSession;
//! use std::path::Path;
//!
//! let session = DesignSession::new("Designer", "25-001", "Client");
//! let path = Path::new("rooftop.sld");
//!
//! save_session(&session, path).unwrap();
//! let loaded = load_session(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::{LayoutError, LayoutResult};
use crate::session::{DesignSession, SCHEMA_VERSION};

/// Extension used for session files
pub const SESSION_EXTENSION: &str = "sld";

/// Save a session with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to a `.tmp` sibling
/// 3. fsync
/// 4. Rename over `path`
///
/// An interrupted save leaves the previous file intact.
pub fn save_session(session: &DesignSession, path: &Path) -> LayoutResult<()> {
    let json = serde_json::to_string_pretty(session).map_err(|e| LayoutError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension(format!("{}.tmp", SESSION_EXTENSION));

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| LayoutError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| LayoutError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| LayoutError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        LayoutError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Load a session and check its schema version.
///
/// # Errors
///
/// * `LayoutError::FileError` - the file cannot be read
/// * `LayoutError::SerializationError` - the file is not a valid session
/// * `LayoutError::VersionMismatch` - written by an incompatible schema
pub fn load_session(path: &Path) -> LayoutResult<DesignSession> {
    let mut file =
        File::open(path).map_err(|e| LayoutError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| LayoutError::file_error("read", path.display().to_string(), e.to_string()))?;

    let session: DesignSession = serde_json::from_str(&contents)
        .map_err(|e| LayoutError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&session.meta.version)?;

    tracing::debug!(
        path = %path.display(),
        obstacles = session.input.obstacles.len(),
        "session loaded"
    );
    Ok(session)
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// The major version must match. While the schema is 0.x, a file with a
/// newer minor version is rejected too.
pub fn validate_version(file_version: &str) -> LayoutResult<()> {
    let mismatch = || LayoutError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_parts.len() < 2 || current_parts.len() < 2 {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
