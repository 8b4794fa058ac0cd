use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::password::{hash_password, verify_password};
use util::files::is_valid_owner_id;

fn check_staff_id(staff_id: &str) -> Result<(), DbErr> {
    if is_valid_owner_id(staff_id) {
        Ok(())
    } else {
        Err(DbErr::Custom(format!(
            "Staff id '{staff_id}' must contain only letters and digits"
        )))
    }
}

/// A teacher account. Login ids (`staff_id`) start with `T`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub staff_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub department: String,
    pub expertise: Option<String>,
    pub intro: Option<String>,
    pub contact_email: Option<String>,
    pub office_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Partial update of a teacher row. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct TeacherChanges {
    pub staff_id: Option<String>,
    pub username: Option<String>,
    pub department: Option<String>,
    pub expertise: Option<String>,
    pub intro: Option<String>,
    pub contact_email: Option<String>,
    pub office_location: Option<String>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        staff_id: &str,
        username: &str,
        password: &str,
        department: &str,
    ) -> Result<Model, DbErr> {
        check_staff_id(staff_id)?;
        let now = Utc::now();
        let teacher = ActiveModel {
            staff_id: Set(staff_id.to_owned()),
            username: Set(username.to_owned()),
            password_hash: Set(hash_password(password)?),
            department: Set(department.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        teacher.insert(db).await
    }

    pub async fn find_by_staff_id(db: &DbConn, staff_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StaffId.eq(staff_id))
            .one(db)
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

    /// Pages through teachers, optionally filtered by a substring of the
    /// name, staff id or department. Returns the page and the total count.
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
                    .add(Column::StaffId.contains(term))
                    .add(Column::Department.contains(term)),
            );
        }

        let total = query.clone().count(db).await?;
        let teachers = query
            .order_by_asc(Column::StaffId)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok((teachers, total))
    }

    pub async fn apply_changes(
        db: &DbConn,
        id: i64,
        changes: TeacherChanges,
    ) -> Result<Model, DbErr> {
        let mut teacher = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(v) = changes.staff_id {
            check_staff_id(&v)?;
            teacher.staff_id = Set(v);
        }
        if let Some(v) = changes.username {
            teacher.username = Set(v);
        }
        if let Some(v) = changes.department {
            teacher.department = Set(v);
        }
        if let Some(v) = changes.expertise {
            teacher.expertise = Set(Some(v));
        }
        if let Some(v) = changes.intro {
            teacher.intro = Set(Some(v));
        }
        if let Some(v) = changes.contact_email {
            teacher.contact_email = Set(Some(v));
        }
        if let Some(v) = changes.office_location {
            teacher.office_location = Set(Some(v));
        }

        teacher.update(db).await
    }
}
