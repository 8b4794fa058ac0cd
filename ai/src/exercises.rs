//! Exercise set generation.
//!
//! The model is asked for a JSON array of exercises. Its reply is decoded
//! best-effort, numbered, and written next to each other as pretty JSON
//! and as a Markdown sheet for review.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::client::{ChatClient, ChatMessage};
use crate::error::AiError;

pub const DEFAULT_TITLE: &str = "Untitled exercise set";
pub const DEFAULT_SCORE: f64 = 10.0;

const SYSTEM_PROMPT: &str =
    "You are a professional teaching assistant who writes high quality exercises for students.";

static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("valid exercise array regex"));

/// Question kind requested from the model, encoded as `1`, `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ExerciseKind {
    Choice,
    FillBlank,
    ShortAnswer,
}

impl ExerciseKind {
    pub fn code(self) -> i32 {
        match self {
            ExerciseKind::Choice => 1,
            ExerciseKind::FillBlank => 2,
            ExerciseKind::ShortAnswer => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ExerciseKind::Choice),
            2 => Some(ExerciseKind::FillBlank),
            3 => Some(ExerciseKind::ShortAnswer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExerciseKind::Choice => "Multiple choice",
            ExerciseKind::FillBlank => "Fill in the blank",
            ExerciseKind::ShortAnswer => "Short answer",
        }
    }

    fn prompt_phrase(self) -> &'static str {
        match self {
            ExerciseKind::Choice => "multiple choice questions (with 4 options)",
            ExerciseKind::FillBlank => "fill-in-the-blank questions",
            ExerciseKind::ShortAnswer => "short answer questions",
        }
    }
}

impl From<ExerciseKind> for i32 {
    fn from(kind: ExerciseKind) -> Self {
        kind.code()
    }
}

impl TryFrom<i32> for ExerciseKind {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ExerciseKind::from_code(code).ok_or_else(|| format!("unknown exercise type {code}"))
    }
}

/// One generated exercise as stored in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub exercise_type: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_score")]
    pub score: f64,
}

fn default_score() -> f64 {
    DEFAULT_SCORE
}

/// What the teacher asked for.
#[derive(Debug, Clone)]
pub struct ExerciseRequest {
    pub content: String,
    pub title: String,
    pub count: u32,
    pub kinds: Vec<ExerciseKind>,
}

/// Files written for one generated set.
#[derive(Debug, Clone)]
pub struct GeneratedSet {
    pub md_path: PathBuf,
    pub json_path: PathBuf,
    pub exercises: Vec<Exercise>,
}

pub fn build_prompt(content: &str, kinds: &[ExerciseKind], count: u32) -> String {
    let kinds = if kinds.is_empty() {
        &[ExerciseKind::Choice, ExerciseKind::FillBlank][..]
    } else {
        kinds
    };
    let kinds_desc = kinds
        .iter()
        .map(|k| k.prompt_phrase())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Based on the teaching material below, write {count} exercises drawn from: {kinds_desc}.
Every exercise must contain:
1. a title
2. the question content
3. the correct answer
4. an explanation of the answer

Multiple choice questions must provide exactly 4 options (A, B, C, D).

Teaching material:
{content}

Reply with JSON only, in this format:
[
  {{
    "title": "exercise title",
    "content": "question content",
    "type": 1,
    "options": ["option A", "option B", "option C", "option D"],
    "answer": "correct answer",
    "explanation": "why this is the answer"
  }}
]
"type" is 1 for multiple choice, 2 for fill in the blank and 3 for short answer.
"options" is required for multiple choice only. Do not add any text outside the JSON."#
    )
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(as_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

fn as_code(value: Option<&Value>) -> i32 {
    value
        .and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .and_then(|n| i32::try_from(n).ok())
        .filter(|n| ExerciseKind::from_code(*n).is_some())
        .unwrap_or(ExerciseKind::Choice.code())
}

/// Pulls the first `[{...}]` block out of a model reply and decodes it
/// leniently. Anything undecodable yields an empty list.
pub fn parse_response(reply: &str) -> Vec<Exercise> {
    let Some(found) = JSON_ARRAY.find(reply) else {
        tracing::warn!("no JSON array found in model reply");
        return Vec::new();
    };

    let items: Vec<Value> = match serde_json::from_str(found.as_str()) {
        Ok(items) => items,
        Err(e) => {
            let preview: String = reply.chars().take(200).collect();
            tracing::error!(error = %e, preview = %preview, "failed to decode exercises");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(i, obj)| {
            let position = i as i32 + 1;
            let options = obj.get("options").and_then(Value::as_array).map(|opts| {
                opts.iter().filter_map(as_text).collect::<Vec<_>>()
            });
            Exercise {
                title: obj
                    .get("title")
                    .and_then(as_text)
                    .unwrap_or_else(|| format!("Exercise {position}")),
                content: obj.get("content").and_then(as_text).unwrap_or_default(),
                exercise_type: as_code(obj.get("type")),
                options: options.filter(|o| !o.is_empty()),
                answer: obj.get("answer").and_then(as_text).unwrap_or_default(),
                explanation: obj
                    .get("explanation")
                    .and_then(as_text)
                    .filter(|e| !e.is_empty()),
                order: position * 10,
                score: obj
                    .get("score")
                    .and_then(Value::as_f64)
                    .unwrap_or(DEFAULT_SCORE),
            }
        })
        .collect()
}

/// Review sheet with answers folded into `<details>` blocks.
pub fn render_markdown(exercises: &[Exercise], title: &str, generated_at: DateTime<Local>) -> String {
    let mut md = vec![
        format!("# {title} - Exercise Set"),
        format!("Generated at: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        "\n## Exercises\n".to_string(),
    ];

    for (i, exercise) in exercises.iter().enumerate() {
        let n = i + 1;
        let label = ExerciseKind::from_code(exercise.exercise_type)
            .unwrap_or(ExerciseKind::ShortAnswer)
            .label();
        let heading = if exercise.title.is_empty() {
            format!("Exercise {n}")
        } else {
            exercise.title.clone()
        };

        md.push(format!("### {n}. {heading} ({label})"));
        md.push(format!("\n**Question**: {}", exercise.content));

        if exercise.exercise_type == ExerciseKind::Choice.code() {
            if let Some(options) = exercise.options.as_ref().filter(|o| !o.is_empty()) {
                md.push("\n**Options**:".to_string());
                for (j, option) in options.iter().enumerate() {
                    let letter = char::from(b'A' + (j % 26) as u8);
                    md.push(format!("- {letter}. {option}"));
                }
            }
        }

        md.push("\n<details>".to_string());
        md.push("<summary>Show answer</summary>".to_string());
        md.push(format!("\n**Answer**: {}", exercise.answer));
        if let Some(explanation) = &exercise.explanation {
            md.push(format!("\n**Explanation**: {explanation}"));
        }
        md.push("</details>".to_string());
        md.push("\n---\n".to_string());
    }

    md.join("\n")
}

/// Asks the model for exercises and writes `{base_name}.json` and
/// `{base_name}.md` into the given directories.
///
/// A reply that cannot be decoded produces an empty set; a failed request
/// is returned as an error.
pub async fn generate(
    client: &dyn ChatClient,
    request: &ExerciseRequest,
    md_dir: &Path,
    json_dir: &Path,
    base_name: &str,
) -> Result<GeneratedSet, AiError> {
    let prompt = build_prompt(&request.content, &request.kinds, request.count);
    let reply = client
        .complete(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
        .await?;

    let exercises = parse_response(&reply);
    tracing::info!(count = exercises.len(), title = %request.title, "exercises parsed");

    tokio::fs::create_dir_all(json_dir).await?;
    tokio::fs::create_dir_all(md_dir).await?;

    let json_path = json_dir.join(format!("{base_name}.json"));
    tokio::fs::write(&json_path, serde_json::to_string_pretty(&exercises)?).await?;

    let md_path = md_dir.join(format!("{base_name}.md"));
    let markdown = render_markdown(&exercises, &request.title, Local::now());
    tokio::fs::write(&md_path, markdown).await?;

    Ok(GeneratedSet {
        md_path,
        json_path,
        exercises,
    })
}

/// Reads a previously written JSON set.
pub async fn load_json(path: &Path) -> Result<Vec<Exercise>, AiError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
