use chrono::{DateTime, Utc};
use db::models::{course, course_notification};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StudentNotification {
    #[serde(flatten)]
    pub notification: course_notification::Model,
    pub is_read: bool,
}

#[derive(Debug, Serialize)]
pub struct EnrolledCourse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub semester: String,
    pub credit: f64,
}

impl From<course::Model> for EnrolledCourse {
    fn from(c: course::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            semester: c.semester,
            credit: c.credit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadReceipt {
    pub notification_id: i64,
    pub read_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_count: u64,
}
