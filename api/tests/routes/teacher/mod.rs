mod course_material_test;
mod course_notification_test;
mod course_test;
mod exercise_generator_test;
mod ppt_test;
