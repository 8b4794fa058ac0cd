//! Read-only access to the per-service log directories.
//!
//! Every logging service writes into `{LOG_DIR}/{service}/` with daily
//! rotated files named `{service}.log.YYYY-MM-DD`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{fs, io, path::Path};

use crate::files::{format_file_size, is_safe_file_name};

/// Known services and their descriptions.
pub const SERVICE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("app", "Application log"),
    ("request", "HTTP request log"),
    ("user_management", "User management log"),
    ("course_management", "Course management log"),
    ("exercise_generator", "Exercise generation log"),
    ("ppt_generator", "Slide deck generation log"),
];

static DATED_LOG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.log\.(\d{4}-\d{2}-\d{2})$").expect("valid log date regex"));

pub fn describe(service: &str) -> String {
    SERVICE_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, desc)| desc.to_string())
        .unwrap_or_else(|| format!("{service} service"))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogService {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogFile {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub size: String,
}

/// Date carried by a rotated log file name, if any.
pub fn log_file_date(file_name: &str) -> Option<NaiveDate> {
    DATED_LOG
        .captures(file_name)
        .and_then(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok())
}

/// All service directories under `log_dir`, sorted by name.
pub fn list_services(log_dir: &Path) -> io::Result<Vec<LogService>> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
        return Ok(Vec::new());
    }

    let mut services = Vec::new();
    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let name = entry.file_name().to_string_lossy().to_string();
            services.push(LogService {
                description: describe(&name),
                name,
            });
        }
    }
    services.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(services)
}

/// Log files of one service, filtered by an inclusive date range and
/// sorted newest first with undated files last.
///
/// Returns `NotFound` when the service directory does not exist.
pub fn list_files(
    log_dir: &Path,
    service: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> io::Result<Vec<LogFile>> {
    let service_dir = service_dir(log_dir, service)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(&service_dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !meta.is_file() || !name.contains(".log") {
            continue;
        }

        let date = log_file_date(&name);
        if let Some(d) = date {
            if start.is_some_and(|s| d < s) || end.is_some_and(|e| d > e) {
                continue;
            }
        }

        files.push(LogFile {
            name,
            date,
            size: format_file_size(meta.len()),
        });
    }

    files.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.name.cmp(&b.name)));
    Ok(files)
}

/// Lines of a service log file without their trailing newlines.
pub fn read_lines(log_dir: &Path, service: &str, file_name: &str) -> io::Result<Vec<String>> {
    if !is_safe_file_name(file_name) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid file name '{file_name}'"),
        ));
    }

    let path = service_dir(log_dir, service)?.join(file_name);
    if !path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("log file '{file_name}' does not exist"),
        ));
    }

    let bytes = fs::read(&path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect())
}

fn service_dir(log_dir: &Path, service: &str) -> io::Result<std::path::PathBuf> {
    let dir = log_dir.join(service);
    if !is_safe_file_name(service) || !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("log service '{service}' does not exist"),
        ));
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seed(dir: &Path) {
        let app = dir.join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("app.log.2024-03-01"), "one\ntwo\r\n").unwrap();
        fs::write(app.join("app.log.2024-03-05"), "three\n").unwrap();
        fs::write(app.join("app.log"), "").unwrap();
        fs::write(app.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(dir.join("custom")).unwrap();
    }

    #[test]
    fn services_are_sorted_and_described() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let services = list_services(dir.path()).unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "app");
        assert_eq!(services[0].description, "Application log");
        assert_eq!(services[1].description, "custom service");
    }

    #[test]
    fn files_are_filtered_and_sorted() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let all = list_files(dir.path(), "app", None, None).unwrap();
        let names: Vec<_> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["app.log.2024-03-05", "app.log.2024-03-01", "app.log"]);

        let from = NaiveDate::from_ymd_opt(2024, 3, 2);
        let ranged = list_files(dir.path(), "app", from, None).unwrap();
        let names: Vec<_> = ranged.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["app.log.2024-03-05", "app.log"]);
    }

    #[test]
    fn missing_service_is_not_found() {
        let dir = tempdir().unwrap();
        let err = list_files(dir.path(), "ghost", None, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn content_strips_newlines_and_rejects_traversal() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let lines = read_lines(dir.path(), "app", "app.log.2024-03-01").unwrap();
        assert_eq!(lines, vec!["one", "two"]);

        let err = read_lines(dir.path(), "app", "../app/app.log").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err = read_lines(dir.path(), "app", "missing.log").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
