pub mod admin;
pub mod course;
pub mod student;
pub mod teacher;

/// Staff id of the fixed demo teacher that owns the seeded course.
pub const DEMO_STAFF_ID: &str = "T0001";
