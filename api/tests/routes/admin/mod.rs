mod log_management_test;
mod user_management_test;
