use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Required student import columns with their Chinese header aliases.
pub const STUDENT_COLUMNS: &[(&str, &str)] = &[
    ("username", "姓名"),
    ("password", "密码"),
    ("student_id", "学号"),
    ("college", "学院"),
    ("major", "专业"),
    ("grade", "年级"),
    ("enrollment_year", "入学年份"),
];

pub const TEACHER_COLUMNS: &[(&str, &str)] = &[
    ("username", "姓名"),
    ("password", "密码"),
    ("staff_id", "教工号"),
    ("department", "所属院系"),
];

/// Header line of the downloadable import template.
pub fn template(columns: &[(&str, &str)]) -> String {
    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    format!("{}\n", names.join(","))
}

/// Splits CSV text into records of trimmed fields.
///
/// Handles quoted fields with embedded commas, newlines and doubled quotes.
/// A leading byte-order mark and blank lines are skipped.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                c => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field).trim().to_string()),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field).trim().to_string());
                push_record(&mut records, std::mem::take(&mut record));
            }
            c => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field.trim().to_string());
        push_record(&mut records, record);
    }
    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    if record.iter().any(|f| !f.is_empty()) {
        records.push(record);
    }
}

/// Maps each required column to its index in `header`, accepting either the
/// English name or the Chinese alias.
pub fn map_columns(
    header: &[String],
    required: &[(&'static str, &'static str)],
) -> Result<HashMap<&'static str, usize>, String> {
    let mut index = HashMap::new();
    for (name, alias) in required {
        let position = header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name) || h == alias)
            .ok_or_else(|| format!("Missing required column: {name}"))?;
        index.insert(*name, position);
    }
    Ok(index)
}

/// Field of `record` for a mapped column; missing cells read as empty.
pub fn cell<'a>(record: &'a [String], columns: &HashMap<&'static str, usize>, name: &str) -> &'a str {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

#[derive(Debug, Serialize, Default)]
pub struct FailedRecord {
    pub username: String,
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ImportResult {
    pub total: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub failed_records: Vec<FailedRecord>,
}

impl ImportResult {
    pub fn succeeded(&mut self) {
        self.total += 1;
        self.success_count += 1;
    }

    pub fn failed(&mut self, username: &str, error: impl Into<String>) {
        self.total += 1;
        self.failed_count += 1;
        self.failed_records.push(FailedRecord {
            username: username.to_string(),
            success: false,
            error: error.into(),
        });
    }
}

/// `?page=&page_size=&search=` for the user lists.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn paging(&self) -> common::PageQuery {
        common::PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// `{status, message, user_id}` returned by the update and reset endpoints.
#[derive(Debug, Serialize, Default)]
pub struct UserActionResponse {
    pub status: String,
    pub message: String,
    pub user_id: String,
}

impl UserActionResponse {
    pub fn success(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            message: message.into(),
            user_id: user_id.into(),
        }
    }
}
