mod admin;
mod auth_test;
mod health_test;
mod student;
mod teacher;
mod user_test;
