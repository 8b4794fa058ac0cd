use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202509010001_create_admins::Migration),
            Box::new(migrations::m202509010002_create_teachers::Migration),
            Box::new(migrations::m202509010003_create_students::Migration),
            Box::new(migrations::m202509010004_create_courses::Migration),
            Box::new(migrations::m202509010005_create_course_students::Migration),
            Box::new(migrations::m202509010006_create_course_materials::Migration),
            Box::new(migrations::m202509010007_create_course_notifications::Migration),
            Box::new(migrations::m202509010008_create_course_notification_reads::Migration),
            Box::new(migrations::m202509010009_create_course_exercise_assignments::Migration),
            Box::new(migrations::m202509010010_create_course_exercises::Migration),
        ]
    }
}
