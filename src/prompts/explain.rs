use crate::domains::feature::FieldSpec;
use crate::domains::form::FormValues;
use crate::prompts::{fence_tag, fenced, require, MissingFields, PromptParts, Sampling, LANGUAGES};

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful coding tutor. You explain code to beginners \
in plain, friendly English, define jargon the first time you use it, and never assume prior \
experience.";

pub const SAMPLING: Sampling = Sampling {
    temperature: 0.3,
    max_tokens: 1000,
};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text_area("code", "Paste your code here")
        .placeholder("def greet(name):\n    return f\"Hello, {name}!\"")
        .required(),
    FieldSpec::select("language", "Language", LANGUAGES),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainInput {
    pub code: String,
    pub language: &'static str,
}

impl ExplainInput {
    pub fn parse(values: &FormValues) -> Result<Self, MissingFields> {
        require(values, FIELDS)?;
        Ok(Self {
            code: values.raw("code").to_string(),
            language: values.choice("language", LANGUAGES),
        })
    }

    pub fn prompt(&self) -> PromptParts {
        let user_prompt = format!(
            "Explain the following {language} code in simple terms.\n\n\
             {code}\n\n\
             Structure your answer with these sections:\n\
             1. **Plain-English summary**: what the code does overall.\n\
             2. **Step by step**: how it works, block by block.\n\
             3. **Key concepts**: each programming concept it relies on, with a one-line definition.\n\
             4. **Improvements**: concrete suggestions to make it clearer, safer or faster.",
            language = self.language,
            code = fenced(&self.code, fence_tag(self.language)),
        );
        PromptParts {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_prompt,
        }
    }
}
