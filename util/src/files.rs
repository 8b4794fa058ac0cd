//! Helpers for the generated files that teachers own by filename prefix.

use chrono::{DateTime, Local};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Filename prefix identifying files generated for a teacher.
pub fn owner_prefix(staff_id: &str) -> String {
    format!("teacher_{staff_id}_")
}

/// Ids that may appear in generated file names: ASCII letters and digits.
///
/// Keeping `_` out of ids means no owner prefix is a prefix of another's.
pub fn is_valid_owner_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Whether `file_name` belongs to the teacher with `staff_id`.
pub fn is_owned_by(file_name: &str, staff_id: &str) -> bool {
    is_valid_owner_id(staff_id) && file_name.starts_with(&owner_prefix(staff_id))
}

/// A bare file name: non-empty, no path separators, no parent references.
pub fn is_safe_file_name(file_name: &str) -> bool {
    !file_name.trim().is_empty()
        && !file_name.contains('/')
        && !file_name.contains('\\')
        && !file_name.contains("..")
        && !file_name.contains('\0')
}

/// Turns a free-form title into something usable inside a file name.
///
/// Whitespace becomes `_`, characters that are illegal on common
/// filesystems are dropped, and an empty result falls back to `untitled`.
/// Runs of `.` collapse to one and edge dots are removed, so the title never
/// puts `..` into a file name.
pub fn sanitize_title(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    for c in title.trim().chars() {
        match c {
            c if c.is_whitespace() => cleaned.push('_'),
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => {}
            c if c.is_control() => {}
            '.' if cleaned.ends_with('.') => {}
            c => cleaned.push(c),
        }
    }

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.trim_matches('_').is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// Human readable byte size: `B`, `KB`, `MB` or `GB` with two decimals.
pub fn format_file_size(size_bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let size = size_bytes as f64;
    if size_bytes < 1024 {
        format!("{size_bytes} B")
    } else if size < KB * KB {
        format!("{:.2} KB", size / KB)
    } else if size < KB * KB * KB {
        format!("{:.2} MB", size / (KB * KB))
    } else {
        format!("{:.2} GB", size / (KB * KB * KB))
    }
}

/// Size in kilobytes rounded to two decimals.
pub fn size_kb(size_bytes: u64) -> f64 {
    ((size_bytes as f64 / 1024.0) * 100.0).round() / 100.0
}

/// A regular file found in a storage directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
}

/// Lists regular files in `dir` accepted by `filter`, newest first.
///
/// A missing directory yields an empty list.
pub fn list_files<F>(dir: &Path, filter: F) -> io::Result<Vec<StoredFile>>
where
    F: Fn(&str) -> bool,
{
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !filter(&name) {
            continue;
        }
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        files.push(StoredFile {
            name,
            path: entry.path(),
            size: meta.len(),
            modified: DateTime::<Local>::from(modified),
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
    Ok(files)
}
