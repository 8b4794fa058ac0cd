use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Roster entry linking a student to a course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub final_score: Option<f64>,
    pub created_at: DateTime<Utc>,
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
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Adds a student to a course. Returns `false` if already enrolled.
    pub async fn enroll(db: &DbConn, course_id: i64, student_pk: i64) -> Result<bool, DbErr> {
        if Self::is_enrolled(db, course_id, student_pk).await? {
            return Ok(false);
        }

        ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_pk),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(true)
    }

    pub async fn is_enrolled(db: &DbConn, course_id: i64, student_pk: i64) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_pk))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Removes the given students from a course, returning how many rows went.
    pub async fn remove(db: &DbConn, course_id: i64, student_pks: &[i64]) -> Result<u64, DbErr> {
        if student_pks.is_empty() {
            return Ok(0);
        }
        let res = Entity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.is_in(student_pks.iter().copied()))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn count_for_course(db: &DbConn, course_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .count(db)
            .await
    }

    pub async fn course_ids_for_student(db: &DbConn, student_pk: i64) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::StudentId.eq(student_pk))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.course_id)
            .collect())
    }
}
