use crate::seed::Seeder;
use db::models::{
    Account, Role,
    student::{Model, NewStudent},
};
use fake::{Fake, faker::name::en::Name};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, DbErr};

const COLLEGES: [(&str, &str); 4] = [
    ("Engineering", "Software Engineering"),
    ("Engineering", "Computer Science"),
    ("Science", "Applied Mathematics"),
    ("Science", "Physics"),
];

pub struct StudentSeeder;

#[async_trait::async_trait]
impl Seeder for StudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut rng = StdRng::from_entropy();

        for n in 1..=20 {
            let student_id = format!("S2024{n:03}");
            if Account::find(db, Role::Student, &student_id).await?.is_some() {
                continue;
            }
            let (college, major) = COLLEGES
                .choose(&mut rng)
                .copied()
                .unwrap_or(("Engineering", "Software Engineering"));
            let year = rng.gen_range(2021..=2024);

            Model::create(
                db,
                NewStudent {
                    student_id,
                    username: Name().fake(),
                    password: "study123".to_string(),
                    college: college.to_string(),
                    major: Some(major.to_string()),
                    grade: Some(format!("Year {}", 2025 - year)),
                    enrollment_year: Some(year),
                },
            )
            .await?;
        }
        Ok(())
    }
}
