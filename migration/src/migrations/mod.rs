pub mod m202509010001_create_admins;
pub mod m202509010002_create_teachers;
pub mod m202509010003_create_students;
pub mod m202509010004_create_courses;
pub mod m202509010005_create_course_students;
pub mod m202509010006_create_course_materials;
pub mod m202509010007_create_course_notifications;
pub mod m202509010008_create_course_notification_reads;
pub mod m202509010009_create_course_exercise_assignments;
pub mod m202509010010_create_course_exercises;
