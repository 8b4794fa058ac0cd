use chrono::NaiveDate;
use db::models::{course, student};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 100, message = "Course name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Semester must be 1-20 characters"))]
    pub semester: String,
    #[validate(range(min = 0.0, message = "Credit cannot be negative"))]
    #[serde(default)]
    pub credit: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 100, message = "Course name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Semester must be 1-20 characters"))]
    pub semester: Option<String>,
    #[validate(range(min = 0.0, message = "Credit cannot be negative"))]
    pub credit: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StudentIdsRequest {
    #[validate(length(min = 1, message = "student_ids must not be empty"))]
    pub student_ids: Vec<String>,
}

/// Rejects an end date before the start date.
pub fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), &'static str> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err("End date cannot be earlier than start date"),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CreatedCourse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub name: String,
    pub student_id: String,
    pub college: String,
    pub grade: Option<String>,
}

impl From<student::Model> for RosterEntry {
    fn from(s: student::Model) -> Self {
        Self {
            name: s.username,
            student_id: s.student_id,
            college: s.college,
            grade: s.grade,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: course::Model,
    pub students: Vec<RosterEntry>,
}

#[derive(Debug, Serialize, Default)]
pub struct EnrollResult {
    pub added: usize,
    pub already_enrolled: Vec<String>,
    pub not_found: Vec<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct RemoveResult {
    pub removed: u64,
}
