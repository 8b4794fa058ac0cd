use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::ConnectionTrait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single question inside an exercise assignment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_exercises")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub title: String,
    pub content: String,
    pub answer: String,
    pub explanation: Option<String>,
    pub exercise_type: ExerciseType,
    pub score: f64,
    pub sort_order: i32,
    pub options: Option<Json>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Question kind, stored and serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ExerciseType {
    #[sea_orm(num_value = 1)]
    Choice,
    #[sea_orm(num_value = 2)]
    FillBlank,
    #[sea_orm(num_value = 3)]
    ShortAnswer,
}

impl From<ExerciseType> for i32 {
    fn from(value: ExerciseType) -> Self {
        value.to_value()
    }
}

impl TryFrom<i32> for ExerciseType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ExerciseType::try_from_value(&value).map_err(|_| format!("unknown exercise type {value}"))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_exercise_assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::course_exercise_assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
}

impl Related<super::course_exercise_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewExercise {
    pub title: String,
    pub content: String,
    pub answer: String,
    pub explanation: Option<String>,
    pub exercise_type: ExerciseType,
    pub score: f64,
    pub sort_order: i32,
    pub options: Option<Json>,
}

impl Model {
    pub async fn create<C>(db: &C, assignment_id: i64, new: NewExercise) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        ActiveModel {
            assignment_id: Set(assignment_id),
            title: Set(new.title),
            content: Set(new.content),
            answer: Set(new.answer),
            explanation: Set(new.explanation),
            exercise_type: Set(new.exercise_type),
            score: Set(new.score),
            sort_order: Set(new.sort_order),
            options: Set(new.options),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
