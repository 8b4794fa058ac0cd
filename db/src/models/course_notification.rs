use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// A notification published to everyone enrolled in a course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub publisher_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub notification_type: NotificationType,
    pub is_pinned: bool,
    pub publish_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of notification, stored and serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum NotificationType {
    #[sea_orm(num_value = 0)]
    General,
    #[sea_orm(num_value = 1)]
    Important,
    #[sea_orm(num_value = 2)]
    Assignment,
    #[sea_orm(num_value = 3)]
    Exam,
    #[sea_orm(num_value = 4)]
    Material,
}

impl From<NotificationType> for i32 {
    fn from(value: NotificationType) -> Self {
        value.to_value()
    }
}

impl TryFrom<i32> for NotificationType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        NotificationType::try_from_value(&value)
            .map_err(|_| format!("unknown notification type {value}"))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::PublisherId",
        to = "super::teacher::Column::Id",
        on_delete = "SetNull"
    )]
    Publisher,

    #[sea_orm(has_many = "super::course_notification_read::Entity")]
    Reads,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::course_notification_read::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Partial update of a notification. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct NotificationChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub notification_type: Option<NotificationType>,
    pub is_pinned: Option<bool>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        publisher_id: i64,
        title: &str,
        content: &str,
        notification_type: NotificationType,
        is_pinned: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let notification = ActiveModel {
            course_id: Set(course_id),
            publisher_id: Set(Some(publisher_id)),
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            notification_type: Set(notification_type),
            is_pinned: Set(is_pinned),
            publish_time: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        notification.insert(db).await
    }

    pub async fn find_in_course(
        db: &DbConn,
        id: i64,
        course_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// One page of a course's notifications, pinned first then newest.
    pub async fn page_for_course(
        db: &DbConn,
        course_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let query = Entity::find().filter(Column::CourseId.eq(course_id));
        let total = query.clone().count(db).await?;
        let items = query
            .order_by_desc(Column::IsPinned)
            .order_by_desc(Column::PublishTime)
            .order_by_desc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok((items, total))
    }

    pub async fn ids_for_courses(db: &DbConn, course_ids: &[i64]) -> Result<Vec<i64>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Entity::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|n| n.id)
            .collect())
    }

    pub async fn apply_changes(
        db: &DbConn,
        id: i64,
        changes: NotificationChanges,
    ) -> Result<Model, DbErr> {
        let mut notification = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(v) = changes.title {
            notification.title = Set(v);
        }
        if let Some(v) = changes.content {
            notification.content = Set(v);
        }
        if let Some(v) = changes.notification_type {
            notification.notification_type = Set(v);
        }
        if let Some(v) = changes.is_pinned {
            notification.is_pinned = Set(v);
        }

        notification.update(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{course, course_notification_read, course_student, student, teacher};
    use crate::test_utils::setup_test_db;

    #[test]
    fn type_codes_round_trip_through_serde() {
        let json = serde_json::to_value(NotificationType::Exam).unwrap();
        assert_eq!(json, serde_json::json!(3));
        let parsed: NotificationType = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(parsed, NotificationType::Important);
        assert!(serde_json::from_value::<NotificationType>(serde_json::json!(9)).is_err());
    }

    #[tokio::test]
    async fn pinned_first_and_read_tracking() {
        let db = setup_test_db().await;
        let t = teacher::Model::create(&db, "T001", "Teacher", "password1", "CS")
            .await
            .unwrap();
        let c = course::Model::create(
            &db,
            t.id,
            course::NewCourse {
                name: "OS".into(),
                semester: "S1".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let s = student::Model::create(
            &db,
            student::NewStudent {
                student_id: "S001".into(),
                username: "Sam".into(),
                password: "password1".into(),
                college: "Eng".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        course_student::Model::enroll(&db, c.id, s.id).await.unwrap();

        let plain = Model::create(&db, c.id, t.id, "Week 1", "Intro", NotificationType::General, false)
            .await
            .unwrap();
        let pinned = Model::create(&db, c.id, t.id, "Exam", "Room 4", NotificationType::Exam, true)
            .await
            .unwrap();

        let (page, total) = Model::page_for_course(&db, c.id, 0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(page[0].id, pinned.id);
        assert_eq!(page[1].id, plain.id);

        assert_eq!(course_notification_read::Model::unread_count(&db, s.id).await.unwrap(), 2);

        let first = course_notification_read::Model::mark_read(&db, plain.id, s.id)
            .await
            .unwrap();
        let again = course_notification_read::Model::mark_read(&db, plain.id, s.id)
            .await
            .unwrap();
        assert_eq!(first.id, again.id);
        assert_eq!(first.read_at, again.read_at);

        assert_eq!(course_notification_read::Model::read_count(&db, plain.id).await.unwrap(), 1);
        assert_eq!(course_notification_read::Model::unread_count(&db, s.id).await.unwrap(), 1);
    }
}
