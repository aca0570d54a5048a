use crate::domains::feature::FieldSpec;
use crate::domains::form::FormValues;
use crate::prompts::{fence_tag, fenced, require, MissingFields, PromptParts, Sampling, LANGUAGES};

pub const SYSTEM_INSTRUCTION: &str = "You are a patient debugging mentor. You find the root cause \
of bugs, show a complete corrected version of the code, and teach the learner how to avoid the \
same mistake next time.";

pub const SAMPLING: Sampling = Sampling {
    temperature: 0.2,
    max_tokens: 1200,
};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text_area("code", "Paste your buggy code").required(),
    FieldSpec::text_area("error", "Error message (optional)")
        .placeholder("Traceback (most recent call last): ..."),
    FieldSpec::select("language", "Language", LANGUAGES),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInput {
    pub code: String,
    pub error: Option<String>,
    pub language: &'static str,
}

impl DebugInput {
    pub fn parse(values: &FormValues) -> Result<Self, MissingFields> {
        require(values, FIELDS)?;
        let error = values.text("error");
        Ok(Self {
            code: values.raw("code").to_string(),
            error: (!error.is_empty()).then(|| error.to_string()),
            language: values.choice("language", LANGUAGES),
        })
    }

    pub fn prompt(&self) -> PromptParts {
        let error = match &self.error {
            Some(error) => format!("It fails with this error:\n\n{}", fenced(error, "text")),
            None => "No error message was provided; infer the problem from the code.".to_string(),
        };
        let user_prompt = format!(
            "Find and fix the bugs in the following {language} code.\n\n\
             {code}\n\n\
             {error}\n\n\
             Respond with these sections:\n\
             1. **Diagnosis**: what is wrong and where.\n\
             2. **Corrected code**: the complete fixed version in a single code block.\n\
             3. **Why it works**: the reasoning behind each change.\n\
             4. **Prevention tips**: habits or checks that catch this kind of bug early.",
            language = self.language,
            code = fenced(&self.code, fence_tag(self.language)),
        );
        PromptParts {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_prompt,
        }
    }
}
