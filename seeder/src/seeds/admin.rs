use crate::seed::Seeder;
use db::models::{Account, Role, admin::Model};
use sea_orm::{DatabaseConnection, DbErr};

pub struct AdminSeeder;

#[async_trait::async_trait]
impl Seeder for AdminSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if Account::find(db, Role::Admin, "A0001").await?.is_none() {
            Model::create(db, "A0001", "admin", "admin123", Some("all")).await?;
        }
        Ok(())
    }
}
