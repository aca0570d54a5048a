//! Prompt templates, one module per feature.
//!
//! Each builder parses its feature's [`FormValues`], refuses when a required
//! field is blank, and otherwise produces the system instruction and user
//! prompt sent to the completion client. Builders never fail on content: model
//! output is passed through untouched.

pub mod career;
pub mod debug;
pub mod explain;
pub mod lesson;
pub mod quiz;
pub mod taxonomy;

use crate::domains::feature::{Feature, FieldKind, FieldSpec};
use crate::domains::form::FormValues;

pub const LANGUAGES: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C",
    "C++",
    "C#",
    "Go",
    "Rust",
    "PHP",
    "Ruby",
    "Kotlin",
    "Swift",
    "SQL",
    "HTML/CSS",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Sampling parameters fixed per feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Labels of required fields that were left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Please fill in: {}", self.0.join(", "))
    }
}

impl std::error::Error for MissingFields {}

/// Parsed, validated input for one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureInput {
    Explain(explain::ExplainInput),
    Debug(debug::DebugInput),
    Lesson(lesson::LessonInput),
    Quiz(quiz::QuizInput),
    Career(career::CareerInput),
}

impl FeatureInput {
    pub fn parse(feature: Feature, values: &FormValues) -> Result<Self, MissingFields> {
        Ok(match feature {
            Feature::CodeExplainer => Self::Explain(explain::ExplainInput::parse(values)?),
            Feature::DebuggingAssistant => Self::Debug(debug::DebugInput::parse(values)?),
            Feature::MiniLessons => Self::Lesson(lesson::LessonInput::parse(values)?),
            Feature::QuizGenerator => Self::Quiz(quiz::QuizInput::parse(values)?),
            Feature::CareerGuide => Self::Career(career::CareerInput::parse(values)?),
        })
    }

    pub fn feature(&self) -> Feature {
        match self {
            Self::Explain(_) => Feature::CodeExplainer,
            Self::Debug(_) => Feature::DebuggingAssistant,
            Self::Lesson(_) => Feature::MiniLessons,
            Self::Quiz(_) => Feature::QuizGenerator,
            Self::Career(_) => Feature::CareerGuide,
        }
    }

    pub fn prompt(&self) -> PromptParts {
        match self {
            Self::Explain(input) => input.prompt(),
            Self::Debug(input) => input.prompt(),
            Self::Lesson(input) => input.prompt(),
            Self::Quiz(input) => input.prompt(),
            Self::Career(input) => input.prompt(),
        }
    }

    pub fn sampling(&self) -> Sampling {
        sampling(self.feature())
    }
}

pub fn fields(feature: Feature) -> &'static [FieldSpec] {
    match feature {
        Feature::CodeExplainer => explain::FIELDS,
        Feature::DebuggingAssistant => debug::FIELDS,
        Feature::MiniLessons => lesson::FIELDS,
        Feature::QuizGenerator => quiz::FIELDS,
        Feature::CareerGuide => career::FIELDS,
    }
}

pub fn sampling(feature: Feature) -> Sampling {
    match feature {
        Feature::CodeExplainer => explain::SAMPLING,
        Feature::DebuggingAssistant => debug::SAMPLING,
        Feature::MiniLessons => lesson::SAMPLING,
        Feature::QuizGenerator => quiz::SAMPLING,
        Feature::CareerGuide => career::SAMPLING,
    }
}

/// Checks every field flagged `required` and returns the blank ones.
pub(crate) fn require(values: &FormValues, fields: &[FieldSpec]) -> Result<(), MissingFields> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|field| field.required)
        .filter(|field| match field.kind {
            FieldKind::MultiSelect(options) => values.choices(field.name, options).is_empty(),
            _ => values.text(field.name).is_empty(),
        })
        .map(|field| field.label)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFields(missing))
    }
}

/// Info-string for a markdown code fence in the given language.
pub(crate) fn fence_tag(language: &str) -> &'static str {
    match language {
        "Python" => "python",
        "JavaScript" => "javascript",
        "TypeScript" => "typescript",
        "Java" => "java",
        "C" => "c",
        "C++" => "cpp",
        "C#" => "csharp",
        "Go" => "go",
        "Rust" => "rust",
        "PHP" => "php",
        "Ruby" => "ruby",
        "Kotlin" => "kotlin",
        "Swift" => "swift",
        "SQL" => "sql",
        "HTML/CSS" => "html",
        _ => "",
    }
}

/// Wraps `body` in a backtick fence longer than any backtick run inside it.
pub(crate) fn fenced(body: &str, tag: &str) -> String {
    let longest_run = body
        .split(|ch: char| ch != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}{tag}\n{}\n{fence}", body.trim_end())
}
