use crate::routes::common::{error_response, local_time};
use ai::exercises::{DEFAULT_TITLE, Exercise, ExerciseKind};
use axum::{http::StatusCode, response::Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use util::files::{StoredFile, is_owned_by, is_safe_file_name, size_kb};
use validator::Validate;

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_count() -> u32 {
    5
}

fn default_limit() -> usize {
    50
}

fn default_total_score() -> f64 {
    100.0
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[validate(range(min = 1, max = 50, message = "count must be between 1 and 50"))]
    #[serde(default = "default_count")]
    pub count: u32,
    pub types: Option<Vec<ExerciseKind>>,
}

impl GenerateRequest {
    /// Requested kinds, choice and fill-in-the-blank when none are given.
    pub fn kinds(&self) -> Vec<ExerciseKind> {
        match &self.types {
            Some(kinds) if !kinds.is_empty() => kinds.clone(),
            _ => vec![ExerciseKind::Choice, ExerciseKind::FillBlank],
        }
    }

    pub fn title(&self) -> &str {
        match self.title.trim() {
            "" => DEFAULT_TITLE,
            t => t,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct GenerateResponse {
    pub md_filename: String,
    pub json_filename: String,
    pub exercise_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub title_filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FileItem {
    pub filename: String,
    pub created_at: String,
    pub size_kb: f64,
}

impl From<StoredFile> for FileItem {
    fn from(f: StoredFile) -> Self {
        Self {
            filename: f.name,
            created_at: local_time(f.modified),
            size_kb: size_kb(f.size),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MdContent {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ExerciseDetail {
    pub filename: String,
    pub exercise_count: usize,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveAssignmentRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    #[validate(length(min = 1, message = "exercises_data must not be empty"))]
    pub exercises_data: Vec<Exercise>,
    #[validate(range(min = 0.0, message = "total_score cannot be negative"))]
    #[serde(default = "default_total_score")]
    pub total_score: f64,
    pub start_time: Option<DateTime<Utc>>,
    pub due_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Serialize)]
pub struct SavedAssignment {
    pub assignment_id: i64,
    pub exercise_count: usize,
}

/// File kinds a generated set is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetFile {
    Markdown,
    Json,
}

impl SetFile {
    /// Extensions are matched exactly, since handlers rebuild sibling paths
    /// from the stem with lowercase extensions.
    pub fn of(file_name: &str) -> Option<Self> {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some("md") => Some(SetFile::Markdown),
            Some("json") => Some(SetFile::Json),
            _ => None,
        }
    }
}

/// Name checks shared by every endpoint that takes a generated file name.
///
/// Unsafe names are a 400, another teacher's prefix a 403, and a file type
/// outside `allowed` a 400.
pub fn check_file_name(
    file_name: &str,
    staff_id: &str,
    allowed: &[SetFile],
) -> Result<SetFile, Response> {
    if !is_safe_file_name(file_name) {
        return Err(error_response(StatusCode::BAD_REQUEST, "Invalid file name"));
    }
    if !is_owned_by(file_name, staff_id) {
        return Err(error_response(
            StatusCode::FORBIDDEN,
            "You do not have access to this file",
        ));
    }
    match SetFile::of(file_name) {
        Some(kind) if allowed.contains(&kind) => Ok(kind),
        _ => {
            let names: Vec<&str> = allowed
                .iter()
                .map(|k| match k {
                    SetFile::Markdown => ".md",
                    SetFile::Json => ".json",
                })
                .collect();
            Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Only {} files are supported", names.join(" or ")),
            ))
        }
    }
}

/// File name without its extension.
pub fn stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
}
