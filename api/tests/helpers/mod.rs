pub mod app;

pub use app::{make_test_app, make_test_app_with_reply};
