use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// A course owned by one teacher.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub semester: String,
    pub credit: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,

    #[sea_orm(has_many = "super::course_student::Entity")]
    CourseStudent,

    #[sea_orm(has_many = "super::course_material::Entity")]
    CourseMaterial,

    #[sea_orm(has_many = "super::course_notification::Entity")]
    CourseNotification,

    #[sea_orm(has_many = "super::course_exercise_assignment::Entity")]
    CourseExerciseAssignment,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
}

impl Related<super::course_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseMaterial.def()
    }
}

impl Related<super::course_notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseNotification.def()
    }
}

impl Related<super::course_exercise_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseExerciseAssignment.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_student::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_student::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub semester: String,
    pub credit: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Partial update of a course. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub credit: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Model {
    pub async fn create(db: &DbConn, teacher_id: i64, new: NewCourse) -> Result<Model, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            teacher_id: Set(teacher_id),
            semester: Set(new.semester),
            credit: Set(new.credit),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        course.insert(db).await
    }

    /// The course with `id` if it belongs to `teacher_id`.
    pub async fn find_owned(
        db: &DbConn,
        id: i64,
        teacher_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::TeacherId.eq(teacher_id))
            .one(db)
            .await
    }

    /// Courses of a teacher, newest first.
    pub async fn list_for_teacher(db: &DbConn, teacher_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Courses a student is enrolled in, by name.
    pub async fn list_for_student(db: &DbConn, student_pk: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .inner_join(super::course_student::Entity)
            .filter(super::course_student::Column::StudentId.eq(student_pk))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    /// Enrolled students ordered by student number.
    pub async fn students(&self, db: &DbConn) -> Result<Vec<super::student::Model>, DbErr> {
        self.find_related(super::student::Entity)
            .order_by_asc(super::student::Column::StudentId)
            .all(db)
            .await
    }

    pub async fn apply_changes(
        db: &DbConn,
        id: i64,
        changes: CourseChanges,
    ) -> Result<Model, DbErr> {
        let mut course = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(v) = changes.name {
            course.name = Set(v);
        }
        if let Some(v) = changes.description {
            course.description = Set(Some(v));
        }
        if let Some(v) = changes.semester {
            course.semester = Set(v);
        }
        if let Some(v) = changes.credit {
            course.credit = Set(v);
        }
        if let Some(v) = changes.start_date {
            course.start_date = Set(Some(v));
        }
        if let Some(v) = changes.end_date {
            course.end_date = Set(Some(v));
        }

        course.update(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
