use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// Metadata of a file uploaded to a course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub uploader_id: Option<i64>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub description: Option<String>,
    pub upload_time: DateTime<Utc>,
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
        from = "Column::UploaderId",
        to = "super::teacher::Column::Id",
        on_delete = "SetNull"
    )]
    Uploader,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        uploader_id: i64,
        file_name: &str,
        file_path: &str,
        file_size: i64,
        description: Option<String>,
    ) -> Result<Model, DbErr> {
        let material = ActiveModel {
            course_id: Set(course_id),
            uploader_id: Set(Some(uploader_id)),
            file_name: Set(file_name.to_owned()),
            file_path: Set(file_path.to_owned()),
            file_size: Set(file_size),
            description: Set(description),
            upload_time: Set(Utc::now()),
            ..Default::default()
        };

        material.insert(db).await
    }

    pub async fn find_by_name(
        db: &DbConn,
        course_id: i64,
        file_name: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::FileName.eq(file_name))
            .one(db)
            .await
    }

    /// Materials of a course, most recent upload first.
    pub async fn list_for_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::UploadTime)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Lowercase extension including the dot, or an empty string.
    pub fn file_extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }
}
