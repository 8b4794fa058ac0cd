use db::models::course_notification::{self, NotificationType};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub notification_type: Option<NotificationType>,
    #[serde(default)]
    pub is_pinned: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,
    pub notification_type: Option<NotificationType>,
    pub is_pinned: Option<bool>,
}

/// A notification as the teacher sees it, with read statistics.
#[derive(Debug, Serialize)]
pub struct NotificationWithStats {
    #[serde(flatten)]
    pub notification: course_notification::Model,
    pub read_count: u64,
    pub total_students: u64,
}

#[derive(Debug, Serialize)]
pub struct NotificationPage<T> {
    pub notifications: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_and_pin_are_optional() {
        let req: CreateNotificationRequest =
            serde_json::from_str(r#"{"title":"Quiz","content":"Friday"}"#).unwrap();
        assert!(req.notification_type.is_none());
        assert!(!req.is_pinned);

        let req: CreateNotificationRequest = serde_json::from_str(
            r#"{"title":"Exam","content":"Hall B","notification_type":3,"is_pinned":true}"#,
        )
        .unwrap();
        assert_eq!(req.notification_type, Some(NotificationType::Exam));
        assert!(req.is_pinned);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let res: Result<CreateNotificationRequest, _> =
            serde_json::from_str(r#"{"title":"x","content":"y","notification_type":9}"#);
        assert!(res.is_err());
    }
}
