//! Lecture slide generation in two steps.
//!
//! 1. [`generate_outline`] asks the model for a Markdown outline that the
//!    teacher can edit.
//! 2. [`parse_outline`] turns the (possibly edited) outline into a [`Deck`],
//!    which [`pptx::write_deck`] renders as a `.pptx` file.
//!
//! Outlines are understood in English and Chinese:
//!
//! ```text
//! ## Slide 1: Cover            ## 幻灯片1：封面
//! - Title: Better title        - 标题：更好的标题
//! - Content:                   - 内容：
//! body line                    正文
//! ## Teacher Notes             ## 教师备注
//! - Slide 1: say hello         - 幻灯片1：问好
//! ```

pub mod pptx;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::client::{ChatClient, ChatMessage};
use crate::error::AiError;

const SYSTEM_PROMPT: &str =
    "You are a professional courseware assistant who designs lecture slides for teachers.";

static SLIDE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#{2,3}\s*(?i:slide|幻灯片)\s*(\d+)\s*[:：.\-]?\s*(.*)$")
        .expect("valid slide heading regex")
});

static NOTES_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#{2,3}\s*(?i:teacher\s*notes|speaker\s*notes|教师备注)")
        .expect("valid notes heading regex")
});

static NOTE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-*]\s*(?i:slide|幻灯片)\s*(\d+)\s*[:：]\s*(.+)$").expect("valid note line regex")
});

static TITLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s*(?i:title|标题)\s*[:：]\s*(.*)$").expect("valid title regex"));

static CONTENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-*]\s*(?i:content|内容)\s*[:：]\s*(.*)$").expect("valid content regex")
});

/// Options offered by the slide form.
pub const SUBJECTS: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Chinese",
    "English",
    "History",
    "Geography",
    "Politics",
    "Music",
    "Art",
    "Physical Education",
    "Other",
];

pub const GRADES: &[&str] = &[
    "Primary School",
    "Junior High School",
    "Senior High School",
    "Undergraduate Year 1",
    "Undergraduate Year 2",
    "Undergraduate Year 3",
    "Undergraduate Year 4",
    "Postgraduate",
    "Vocational Training",
];

/// What the teacher wants the deck to cover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineRequest {
    pub title: String,
    pub subject: String,
    pub target_grade: String,
    pub teaching_target: String,
    pub key_points: Vec<String>,
    pub slide_count: u32,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub content: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

/// RGB hex colours used when rendering a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub text: &'static str,
    pub bullet: &'static str,
}

pub const FOOTER_COLOR: &str = "808080";

/// Theme for a design preference. Unknown or missing values use `default`.
pub fn theme(preference: Option<&str>) -> Theme {
    match preference.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
        Some("modern") => Theme {
            title: "006699",
            subtitle: "0099CC",
            text: "333333",
            bullet: "009999",
        },
        Some("warm") => Theme {
            title: "CC3300",
            subtitle: "E79124",
            text: "333300",
            bullet: "993300",
        },
        Some("elegant") => Theme {
            title: "442366",
            subtitle: "6D4796",
            text: "000000",
            bullet: "4C2F6B",
        },
        _ => Theme {
            title: "1F497D",
            subtitle: "4472C4",
            text: "000000",
            bullet: "595959",
        },
    }
}

pub fn build_outline_prompt(request: &OutlineRequest) -> String {
    let extra = request
        .additional_info
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("Additional information: {s}\n"))
        .unwrap_or_default();

    format!(
        r#"Design a detailed lecture slide outline for the following lesson.

Title: {title}
Subject: {subject}
Target grade: {grade}
Teaching target: {target}
Key points: {points}
Number of slides: {count}
{extra}
Produce exactly {count} slides. Cover, in order: a cover slide (title and a short introduction),
learning objectives (concrete and measurable), core content with definitions, principles and examples,
worked examples (runnable code for programming topics), a practice activity with clear steps,
and a summary that does not merely repeat earlier slides.

Use exactly this Markdown format:

## Slide 1: <slide title>
- Content:
<slide body, one point per line, "- " for bullets and two extra spaces for sub-bullets>

## Slide 2: <slide title>
...

## Teacher Notes
- Slide 1: <what the teacher should say>
- Slide 2: ..."#,
        title = request.title,
        subject = request.subject,
        grade = request.target_grade,
        target = request.teaching_target,
        points = request.key_points.join(", "),
        count = request.slide_count,
    )
}

/// Requests a Markdown outline from the model.
pub async fn generate_outline(
    client: &dyn ChatClient,
    request: &OutlineRequest,
) -> Result<String, AiError> {
    client
        .complete(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_outline_prompt(request)),
        ])
        .await
}

/// Parses an outline into slides. Lines before the first slide heading
/// are ignored; notes are matched to slides by their 1-based number.
pub fn parse_outline(outline_md: &str, title: &str) -> Deck {
    let mut slides: Vec<Slide> = Vec::new();
    let mut current: Option<Slide> = None;
    let mut in_notes = false;

    for raw in outline_md.lines() {
        let line = raw.trim();

        if let Some(caps) = SLIDE_HEADING.captures(line) {
            if let Some(done) = current.take() {
                slides.push(done);
            }
            in_notes = false;
            let slide_title = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| line.trim_start_matches('#').trim().to_string());
            current = Some(Slide {
                title: slide_title,
                content: String::new(),
                note: None,
            });
            continue;
        }

        if NOTES_HEADING.is_match(line) {
            if let Some(done) = current.take() {
                slides.push(done);
            }
            in_notes = true;
            continue;
        }

        if in_notes {
            if let Some(caps) = NOTE_LINE.captures(line) {
                let index = caps[1].parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                if let Some(slide) = index.and_then(|i| slides.get_mut(i)) {
                    slide.note = Some(caps[2].trim().to_string());
                }
            }
            continue;
        }

        let Some(slide) = current.as_mut() else {
            continue;
        };
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = TITLE_LINE.captures(line) {
            slide.title = caps[1].trim().to_string();
        } else if let Some(caps) = CONTENT_LINE.captures(line) {
            slide.content.clear();
            let rest = caps[1].trim();
            if !rest.is_empty() {
                slide.content.push_str(rest);
                slide.content.push('\n');
            }
        } else {
            slide.content.push_str(raw.trim_end());
            slide.content.push('\n');
        }
    }

    if let Some(done) = current {
        slides.push(done);
    }

    Deck {
        title: title.to_string(),
        slides,
    }
}

/// Cover subtitle: the first two non-bullet lines joined with ` | `.
pub fn extract_subtitle(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('*') && !l.starts_with('-'))
        .take(2)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// A body paragraph with its bullet level (0 = plain text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub level: u8,
    pub text: String,
}

/// Splits slide content into paragraphs. `- ` and `* ` bullets are level 1,
/// indented bullets level 2.
pub fn paragraphs(content: &str) -> Vec<Paragraph> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            let indent = l.len() - l.trim_start().len();
            let trimmed = l.trim();
            let bullet = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* "));
            match bullet {
                Some(text) if indent >= 2 => Paragraph {
                    level: 2,
                    text: text.trim().to_string(),
                },
                Some(text) => Paragraph {
                    level: 1,
                    text: text.trim().to_string(),
                },
                None => Paragraph {
                    level: 0,
                    text: trimmed.to_string(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = "# Sorting\n\n## Slide 1: Sorting Algorithms\n- Content:\nAn introduction\nWeek 3\n- not in subtitle\n\n## Slide 2: Bubble sort\n- Title: Bubble Sort\n- Content:\n- compare neighbours\n  - swap when out of order\n\n## Teacher Notes\n- Slide 1: Welcome everyone\n- Slide 2: Draw it on the board\n- Slide 9: ignored\n";

    const CHINESE: &str = "## 幻灯片1：排序\n- 内容：\n简介\n## 幻灯片2：冒泡排序\n- 标题：冒泡\n比较相邻元素\n## 教师备注\n- 幻灯片2：板书演示\n";

    #[test]
    fn english_outline_is_parsed() {
        let deck = parse_outline(ENGLISH, "Sorting");
        assert_eq!(deck.title, "Sorting");
        assert_eq!(deck.slides.len(), 2);

        assert_eq!(deck.slides[0].title, "Sorting Algorithms");
        assert_eq!(deck.slides[0].content, "An introduction\nWeek 3\n- not in subtitle\n");
        assert_eq!(deck.slides[0].note.as_deref(), Some("Welcome everyone"));

        assert_eq!(deck.slides[1].title, "Bubble Sort");
        assert_eq!(deck.slides[1].content, "- compare neighbours\n  - swap when out of order\n");
        assert_eq!(deck.slides[1].note.as_deref(), Some("Draw it on the board"));
    }

    #[test]
    fn chinese_outline_is_parsed() {
        let deck = parse_outline(CHINESE, "排序");
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].title, "排序");
        assert_eq!(deck.slides[0].content, "简介\n");
        assert!(deck.slides[0].note.is_none());
        assert_eq!(deck.slides[1].title, "冒泡");
        assert_eq!(deck.slides[1].note.as_deref(), Some("板书演示"));
    }

    #[test]
    fn outline_without_slides_is_empty() {
        assert!(parse_outline("just some text", "x").slides.is_empty());
    }

    #[test]
    fn subtitle_skips_bullets() {
        let deck = parse_outline(ENGLISH, "Sorting");
        assert_eq!(extract_subtitle(&deck.slides[0].content), "An introduction | Week 3");
    }

    #[test]
    fn paragraph_levels_follow_indentation() {
        let paras = paragraphs("Intro\n- point\n  * detail\n\n");
        assert_eq!(
            paras,
            vec![
                Paragraph { level: 0, text: "Intro".into() },
                Paragraph { level: 1, text: "point".into() },
                Paragraph { level: 2, text: "detail".into() },
            ]
        );
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(theme(Some("neon")), theme(None));
        assert_eq!(theme(Some("Modern")).title, "006699");
    }

    #[test]
    fn prompt_carries_request_fields() {
        let prompt = build_outline_prompt(&OutlineRequest {
            title: "Recursion".into(),
            subject: "Computer Science".into(),
            target_grade: "Undergraduate Year 1".into(),
            teaching_target: "Understand base cases".into(),
            key_points: vec!["base case".into(), "call stack".into()],
            slide_count: 8,
            additional_info: None,
        });
        assert!(prompt.contains("Title: Recursion"));
        assert!(prompt.contains("Key points: base case, call stack"));
        assert!(prompt.contains("Produce exactly 8 slides"));
        assert!(!prompt.contains("Additional information"));
    }
}
