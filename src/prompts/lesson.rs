use crate::domains::feature::FieldSpec;
use crate::domains::form::FormValues;
use crate::prompts::taxonomy::{self, TOPICS};
use crate::prompts::{MissingFields, PromptParts, Sampling};

pub const SYSTEM_INSTRUCTION: &str = "You are an encouraging programming teacher who writes short, \
focused lessons for self-taught learners. Use simple words and small, runnable examples.";

pub const SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 700,
};

pub const LENGTHS: &[&str] = &["3 sentences", "1 paragraph", "2-3 paragraphs"];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("topic", "Ask a coding topic")
        .placeholder("e.g., Python loops, Git basics"),
    FieldSpec::grouped("subtopic", "...or pick one", TOPICS),
    FieldSpec::select("length", "Lesson length", LENGTHS),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonInput {
    pub topic: String,
    pub category: Option<&'static str>,
    pub length: &'static str,
}

impl LessonInput {
    /// Free text wins over the picked subtopic; one of the two is required.
    pub fn parse(values: &FormValues) -> Result<Self, MissingFields> {
        let length = values.choice("length", LENGTHS);
        let typed = values.text("topic");
        if !typed.is_empty() {
            return Ok(Self {
                topic: typed.to_string(),
                category: None,
                length,
            });
        }
        match taxonomy::lookup(values.text("subtopic")) {
            Some((category, subtopic)) => Ok(Self {
                topic: subtopic.to_string(),
                category: Some(category),
                length,
            }),
            None => Err(MissingFields(vec!["Topic"])),
        }
    }

    fn length_directive(&self) -> &'static str {
        match self.length {
            "1 paragraph" => "Keep the lesson to one paragraph, plus the example.",
            "2-3 paragraphs" => "Write two to three short paragraphs, plus the example.",
            _ => "Keep the lesson to three sentences, plus the example.",
        }
    }

    pub fn prompt(&self) -> PromptParts {
        let subject = match self.category {
            Some(category) => format!("{} (part of {category})", self.topic),
            None => self.topic.clone(),
        };
        let user_prompt = format!(
            "Give me a short lesson on: {subject}\n\n\
             Length: {length}. {directive}\n\n\
             Cover, in order:\n\
             - **Definition**: what it is.\n\
             - **Why it matters**: when and why a developer uses it.\n\
             - **Example**: a small code example or concrete scenario.\n\
             - **Tip**: one practical tip or common pitfall.",
            length = self.length,
            directive = self.length_directive(),
        );
        PromptParts {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_prompt,
        }
    }
}
