use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::password::{hash_password, verify_password};

/// A student account. Login ids (`student_id`) start with `S`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub college: String,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub enrollment_year: Option<i32>,
    pub intro: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_student::Entity")]
    CourseStudent,
}

impl Related<super::course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_student::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_student::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields needed to create a student.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub student_id: String,
    pub username: String,
    pub password: String,
    pub college: String,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub enrollment_year: Option<i32>,
}

/// Partial update of a student row. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub student_id: Option<String>,
    pub username: Option<String>,
    pub college: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub enrollment_year: Option<i32>,
    pub intro: Option<String>,
    pub contact_email: Option<String>,
}

impl Model {
    pub async fn create(db: &DbConn, new: NewStudent) -> Result<Model, DbErr> {
        let now = Utc::now();
        let student = ActiveModel {
            student_id: Set(new.student_id),
            username: Set(new.username),
            password_hash: Set(hash_password(&new.password)?),
            college: Set(new.college),
            major: Set(new.major),
            grade: Set(new.grade),
            enrollment_year: Set(new.enrollment_year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        student.insert(db).await
    }

    pub async fn find_by_student_id(
        db: &DbConn,
        student_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    pub async fn find_by_student_ids(
        db: &DbConn,
        student_ids: &[String],
    ) -> Result<Vec<Model>, DbErr> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::StudentId.is_in(student_ids.iter().cloned()))
            .all(db)
            .await
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    pub async fn set_password(db: &DbConn, id: i64, password: &str) -> Result<(), DbErr> {
        ActiveModel {
            id: Set(id),
            password_hash: Set(hash_password(password)?),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(())
    }

    /// Pages through students, optionally filtered by a substring of the
    /// name, student id, college or major. Returns the page and the total count.
    pub async fn search(
        db: &DbConn,
        search: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let mut query = Entity::find();
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(Column::Username.contains(term))
                    .add(Column::StudentId.contains(term))
                    .add(Column::College.contains(term))
                    .add(Column::Major.contains(term)),
            );
        }

        let total = query.clone().count(db).await?;
        let students = query
            .order_by_asc(Column::StudentId)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok((students, total))
    }

    pub async fn apply_changes(
        db: &DbConn,
        id: i64,
        changes: StudentChanges,
    ) -> Result<Model, DbErr> {
        let mut student = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(v) = changes.student_id {
            student.student_id = Set(v);
        }
        if let Some(v) = changes.username {
            student.username = Set(v);
        }
        if let Some(v) = changes.college {
            student.college = Set(v);
        }
        if let Some(v) = changes.major {
            student.major = Set(Some(v));
        }
        if let Some(v) = changes.grade {
            student.grade = Set(Some(v));
        }
        if let Some(v) = changes.enrollment_year {
            student.enrollment_year = Set(Some(v));
        }
        if let Some(v) = changes.intro {
            student.intro = Set(Some(v));
        }
        if let Some(v) = changes.contact_email {
            student.contact_email = Set(Some(v));
        }

        student.update(db).await
    }
}
