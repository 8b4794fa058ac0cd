use super::DEMO_STAFF_ID;
use crate::seed::Seeder;
use db::models::{Account, Role, teacher::Model};
use fake::{Fake, faker::name::en::Name};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, DbErr};

const DEPARTMENTS: [&str; 4] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Foreign Languages",
];

pub struct TeacherSeeder;

#[async_trait::async_trait]
impl Seeder for TeacherSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if Account::find(db, Role::Teacher, DEMO_STAFF_ID).await?.is_none() {
            Model::create(db, DEMO_STAFF_ID, "Demo Teacher", "teach123", "Computer Science").await?;
        }

        let mut rng = StdRng::from_entropy();
        for _ in 0..5 {
            let staff_id = format!("T{:04}", rng.gen_range(1000..10_000));
            if Account::find(db, Role::Teacher, &staff_id).await?.is_some() {
                continue;
            }
            let name: String = Name().fake();
            let department = DEPARTMENTS.choose(&mut rng).copied().unwrap_or("Mathematics");
            Model::create(db, &staff_id, &name, "teach123", department).await?;
        }
        Ok(())
    }
}
