use crate::domains::feature::FieldSpec;
use crate::domains::form::FormValues;
use crate::prompts::{require, MissingFields, PromptParts, Sampling};

pub const SYSTEM_INSTRUCTION: &str = "You are a coding tutor who writes fair, unambiguous practice \
questions. Every question has exactly one correct answer and an explanation a beginner can follow.";

pub const SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    max_tokens: 900,
};

pub const QUESTION_COUNT: usize = 3;

pub const DIFFICULTIES: &[&str] = &["Beginner", "Intermediate", "Advanced"];

pub const QUESTION_TYPES: &[&str] = &[
    "Multiple Choice",
    "True/False",
    "Fill in the Blank",
    "Code Output",
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("topic", "Enter a coding topic for a quiz")
        .placeholder("e.g., Git, SQL joins, JavaScript promises")
        .required(),
    FieldSpec::select("difficulty", "Difficulty", DIFFICULTIES),
    FieldSpec::select("question_type", "Question type", QUESTION_TYPES),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizInput {
    pub topic: String,
    pub difficulty: &'static str,
    pub question_type: &'static str,
}

impl QuizInput {
    pub fn parse(values: &FormValues) -> Result<Self, MissingFields> {
        require(values, FIELDS)?;
        Ok(Self {
            topic: values.text("topic").to_string(),
            difficulty: values.choice("difficulty", DIFFICULTIES),
            question_type: values.choice("question_type", QUESTION_TYPES),
        })
    }

    fn options_line(&self) -> &'static str {
        match self.question_type {
            "True/False" => "**Options:** True / False",
            "Fill in the Blank" => {
                "(No options. Mark the blank in the question with `____`.)"
            }
            "Code Output" => {
                "A short code snippet in a code block, then **Options:** A) B) C) D) \
                 listing possible outputs"
            }
            _ => "**Options:** A) B) C) D), each on its own line",
        }
    }

    pub fn prompt(&self) -> PromptParts {
        let user_prompt = format!(
            "Create a short quiz of {count} {question_type} questions on: {topic}\n\
             Difficulty: {difficulty}\n\n\
             Format every question as this block, separated by a horizontal rule:\n\
             **Question N:** the question\n\
             {options}\n\
             **Answer:** the correct answer\n\
             **Explanation:** why it is correct\n\
             **Learning tip:** one tip to remember the concept",
            count = QUESTION_COUNT,
            question_type = self.question_type,
            topic = self.topic,
            difficulty = self.difficulty,
            options = self.options_line(),
        );
        PromptParts {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_prompt,
        }
    }
}
