use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::password::{hash_password, verify_password};

/// A platform administrator. Login ids start with `A`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub admin_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub permissions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        admin_id: &str,
        username: &str,
        password: &str,
        permissions: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let admin = ActiveModel {
            admin_id: Set(admin_id.to_owned()),
            username: Set(username.to_owned()),
            password_hash: Set(hash_password(password)?),
            permissions: Set(permissions.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        admin.insert(db).await
    }

    pub async fn find_by_admin_id(db: &DbConn, admin_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AdminId.eq(admin_id))
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
}
