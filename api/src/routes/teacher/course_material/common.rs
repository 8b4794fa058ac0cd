use crate::routes::common::local_time;
use chrono::Local;
use db::models::course_material;
use serde::Serialize;
use util::files::format_file_size;

/// Largest accepted upload.
pub const MAX_MATERIAL_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct MaterialItem {
    pub filename: String,
    pub file_size: String,
    pub upload_time: String,
    pub file_extension: String,
    pub description: Option<String>,
}

impl From<course_material::Model> for MaterialItem {
    fn from(m: course_material::Model) -> Self {
        Self {
            file_size: format_file_size(m.file_size.max(0) as u64),
            upload_time: local_time(m.upload_time.with_timezone(&Local)),
            file_extension: m.file_extension(),
            filename: m.file_name,
            description: m.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MaterialList {
    pub course_id: i64,
    pub course_name: String,
    pub materials: Vec<MaterialItem>,
    pub total_count: usize,
}
