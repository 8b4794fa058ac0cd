pub mod account;
pub mod admin;
pub mod course;
pub mod course_exercise;
pub mod course_exercise_assignment;
pub mod course_material;
pub mod course_notification;
pub mod course_notification_read;
pub mod course_student;
pub mod student;
pub mod teacher;

pub use account::{Account, Role};
