use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Records that a student has read a notification.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_notification_reads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub notification_id: i64,
    pub student_id: i64,
    pub read_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_notification::Entity",
        from = "Column::NotificationId",
        to = "super::course_notification::Column::Id",
        on_delete = "Cascade"
    )]
    Notification,

    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::course_notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Marks a notification read. Repeated calls return the first record.
    pub async fn mark_read(
        db: &DbConn,
        notification_id: i64,
        student_pk: i64,
    ) -> Result<Model, DbErr> {
        if let Some(existing) = Entity::find()
            .filter(Column::NotificationId.eq(notification_id))
            .filter(Column::StudentId.eq(student_pk))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        ActiveModel {
            notification_id: Set(notification_id),
            student_id: Set(student_pk),
            read_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn read_count(db: &DbConn, notification_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::NotificationId.eq(notification_id))
            .count(db)
            .await
    }

    /// Which of `notification_ids` the student has read.
    pub async fn read_ids(
        db: &DbConn,
        student_pk: i64,
        notification_ids: &[i64],
    ) -> Result<HashSet<i64>, DbErr> {
        if notification_ids.is_empty() {
            return Ok(HashSet::new());
        }
        Ok(Entity::find()
            .filter(Column::StudentId.eq(student_pk))
            .filter(Column::NotificationId.is_in(notification_ids.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|r| r.notification_id)
            .collect())
    }

    /// Unread notifications across every course the student is enrolled in.
    pub async fn unread_count(db: &DbConn, student_pk: i64) -> Result<u64, DbErr> {
        let course_ids = super::course_student::Model::course_ids_for_student(db, student_pk).await?;
        let notification_ids =
            super::course_notification::Model::ids_for_courses(db, &course_ids).await?;
        let read = Self::read_ids(db, student_pk, &notification_ids).await?;
        Ok((notification_ids.len() - read.len()) as u64)
    }
}
