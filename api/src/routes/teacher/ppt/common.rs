use ai::slides::{OutlineRequest, Slide};
use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use util::files::{is_valid_owner_id, owner_prefix, sanitize_title};
use validator::Validate;

pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateOutlineRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Target grade is required"))]
    pub target_grade: String,
    #[serde(default)]
    pub teaching_target: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[validate(range(min = 1, max = 50, message = "slide_count must be between 1 and 50"))]
    pub slide_count: u32,
    pub additional_info: Option<String>,
}

impl From<GenerateOutlineRequest> for OutlineRequest {
    fn from(req: GenerateOutlineRequest) -> Self {
        Self {
            title: req.title,
            subject: req.subject,
            target_grade: req.target_grade,
            teaching_target: req.teaching_target,
            key_points: req.key_points,
            slide_count: req.slide_count,
            additional_info: req.additional_info,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct OutlineResponse {
    pub request_id: String,
    pub title: String,
    pub outline_md: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateFromOutlineRequest {
    #[validate(length(min = 1, message = "request_id is required"))]
    pub request_id: String,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    pub outline_md: String,
    pub design_preference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeckResponse {
    pub title: String,
    pub slides: Vec<Slide>,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct OutlineSummary {
    pub request_id: String,
    pub title: String,
    pub created_at: String,
    pub preview: String,
    pub has_generated_ppt: bool,
}

#[derive(Debug, Serialize)]
pub struct PptFile {
    pub file_name: String,
    pub size: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct Options {
    pub options: Vec<&'static str>,
}

/// Prefix shared by every outline of one generation request.
pub fn outline_prefix(staff_id: &str, request_id: &str) -> String {
    format!("outline_{staff_id}_{request_id}_")
}

pub fn outline_file_name(staff_id: &str, request_id: &str, title: &str, at: NaiveDateTime) -> String {
    format!(
        "{}{}_{}.md",
        outline_prefix(staff_id, request_id),
        at.format("%Y%m%d%H%M%S"),
        sanitize_title(title)
    )
}

/// Prefix of the decks generated from one request.
pub fn ppt_prefix(staff_id: &str, request_id: &str) -> String {
    format!("{}{request_id}_", owner_prefix(staff_id))
}

pub fn ppt_file_name(staff_id: &str, request_id: &str, title: &str) -> String {
    format!("{}{}.pptx", ppt_prefix(staff_id, request_id), sanitize_title(title))
}

/// Pieces encoded in an outline file name.
#[derive(Debug, PartialEq)]
pub struct OutlineName {
    pub request_id: String,
    pub created_at: Option<NaiveDateTime>,
    pub title: String,
}

/// Splits `outline_{staff}_{request_id}_{timestamp}_{title}.md` for a known
/// staff id.
pub fn parse_outline_name(file_name: &str, staff_id: &str) -> Option<OutlineName> {
    if !is_valid_owner_id(staff_id) {
        return None;
    }
    let rest = file_name
        .strip_prefix(&format!("outline_{staff_id}_"))?
        .strip_suffix(".md")?;
    let (request_id, rest) = rest.split_once('_')?;
    let (stamp, title) = rest.split_once('_').unwrap_or((rest, ""));
    Some(OutlineName {
        request_id: request_id.to_string(),
        created_at: NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S").ok(),
        title: title.replace('_', " "),
    })
}

pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        format!("{head}...")
    } else {
        head
    }
}

pub fn local_stamp(at: NaiveDateTime) -> String {
    match Local.from_local_datetime(&at).single() {
        Some(t) => crate::routes::common::local_time(t),
        None => at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
