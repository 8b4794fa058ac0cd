use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    admin::AdminSeeder, course::CourseSeeder, student::StudentSeeder, teacher::TeacherSeeder,
};
use colored::*;
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "DB connection failed:".red(), e);
            std::process::exit(1);
        }
    };
    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {}", "Migrations failed:".red(), e);
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(AdminSeeder) as Box<dyn Seeder + Send + Sync>, "Admin"),
        (Box::new(TeacherSeeder), "Teacher"),
        (Box::new(StudentSeeder), "Student"),
        (Box::new(CourseSeeder), "Course"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
