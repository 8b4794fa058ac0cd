pub mod config;
pub mod files;
pub mod logs;
pub mod paths;
