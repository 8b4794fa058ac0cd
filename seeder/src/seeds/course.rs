use super::DEMO_STAFF_ID;
use crate::seed::Seeder;
use chrono::NaiveDate;
use db::models::{
    course::{self, NewCourse},
    course_notification::{self, NotificationType},
    course_student, student, teacher,
};
use sea_orm::{DatabaseConnection, DbErr};

pub struct CourseSeeder;

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let Some(owner) = teacher::Model::find_by_staff_id(db, DEMO_STAFF_ID).await? else {
            return Ok(());
        };
        if !course::Model::list_for_teacher(db, owner.id).await?.is_empty() {
            return Ok(());
        }

        let course = course::Model::create(
            db,
            owner.id,
            NewCourse {
                name: "Data Structures".to_string(),
                description: Some("Lists, trees, graphs and their algorithms".to_string()),
                semester: "2025-Spring".to_string(),
                credit: 3.0,
                start_date: NaiveDate::from_ymd_opt(2025, 2, 24),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            },
        )
        .await?;

        let ids: Vec<String> = (1..=10).map(|n| format!("S2024{n:03}")).collect();
        for s in student::Model::find_by_student_ids(db, &ids).await? {
            course_student::Model::enroll(db, course.id, s.id).await?;
        }

        course_notification::Model::create(
            db,
            course.id,
            owner.id,
            "Welcome to Data Structures",
            "Lecture slides will be uploaded before each class.",
            NotificationType::General,
            false,
        )
        .await?;
        course_notification::Model::create(
            db,
            course.id,
            owner.id,
            "Midterm exam",
            "The midterm covers chapters 1-5 and takes place in week 9.",
            NotificationType::Exam,
            true,
        )
        .await?;

        Ok(())
    }
}
