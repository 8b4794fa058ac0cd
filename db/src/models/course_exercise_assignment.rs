use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};

use super::course_exercise::{self, NewExercise};

/// An exercise set assigned to a course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_exercise_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub total_score: f64,
    pub start_time: DateTime<Utc>,
    pub due_time: DateTime<Utc>,
    pub is_published: bool,
    pub course_id: i64,
    pub creator_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
        from = "Column::CreatorId",
        to = "super::teacher::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,

    #[sea_orm(has_many = "super::course_exercise::Entity")]
    Exercises,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::course_exercise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercises.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: Option<String>,
    pub total_score: f64,
    pub start_time: DateTime<Utc>,
    pub due_time: DateTime<Utc>,
    pub is_published: bool,
    pub course_id: i64,
    pub creator_id: i64,
}

impl Model {
    /// Inserts the assignment and all of its exercises in one transaction.
    pub async fn create_with_exercises(
        db: &DbConn,
        new: NewAssignment,
        exercises: Vec<NewExercise>,
    ) -> Result<(Model, Vec<course_exercise::Model>), DbErr> {
        let txn = db.begin().await?;
        let now = Utc::now();

        let assignment = ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            total_score: Set(new.total_score),
            start_time: Set(new.start_time),
            due_time: Set(new.due_time),
            is_published: Set(new.is_published),
            course_id: Set(new.course_id),
            creator_id: Set(Some(new.creator_id)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut saved = Vec::with_capacity(exercises.len());
        for exercise in exercises {
            saved.push(course_exercise::Model::create(&txn, assignment.id, exercise).await?);
        }

        txn.commit().await?;
        Ok((assignment, saved))
    }

    pub async fn exercises(&self, db: &DbConn) -> Result<Vec<course_exercise::Model>, DbErr> {
        use sea_orm::QueryOrder;

        self.find_related(course_exercise::Entity)
            .order_by_asc(course_exercise::Column::SortOrder)
            .all(db)
            .await
    }
}
