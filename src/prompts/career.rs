use crate::domains::feature::FieldSpec;
use crate::domains::form::FormValues;
use crate::prompts::{require, MissingFields, PromptParts, Sampling};

pub const SYSTEM_INSTRUCTION: &str = "You are a pragmatic software career coach. You give \
realistic, encouraging advice, favour free and low-cost resources, and tailor every \
recommendation to the learner's level and available time.";

pub const SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 1500,
};

pub const EXPERIENCE_LEVELS: &[&str] = &[
    "Complete beginner",
    "Some self-study",
    "Junior developer",
    "Mid-level developer",
    "Senior developer",
];

pub const INTERESTS: &[&str] = &[
    "Web Development",
    "Mobile Development",
    "Data Science",
    "Machine Learning / AI",
    "Cloud & DevOps",
    "Cybersecurity",
    "Game Development",
    "Embedded Systems",
    "UI/UX Design",
    "Blockchain",
];

pub const TIME_COMMITMENTS: &[&str] = &[
    "Less than 5 hours/week",
    "5-10 hours/week",
    "10-20 hours/week",
    "20+ hours/week",
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::select("experience", "Experience level", EXPERIENCE_LEVELS),
    FieldSpec::multi("interests", "Interests", INTERESTS).required(),
    FieldSpec::text("goal", "Ask anything about your software career path")
        .placeholder("e.g., land my first remote junior role")
        .required(),
    FieldSpec::select("time", "Time commitment", TIME_COMMITMENTS),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerInput {
    pub experience: &'static str,
    pub interests: Vec<&'static str>,
    pub goal: String,
    pub time: &'static str,
}

impl CareerInput {
    pub fn parse(values: &FormValues) -> Result<Self, MissingFields> {
        require(values, FIELDS)?;
        Ok(Self {
            experience: values.choice("experience", EXPERIENCE_LEVELS),
            interests: values.choices("interests", INTERESTS),
            goal: values.text("goal").to_string(),
            time: values.choice("time", TIME_COMMITMENTS),
        })
    }

    pub fn prompt(&self) -> PromptParts {
        let user_prompt = format!(
            "Give me career advice for my software career.\n\n\
             - Experience level: {experience}\n\
             - Interests: {interests}\n\
             - Goal: {goal}\n\
             - Time I can commit: {time}\n\n\
             Please include:\n\
             1. **Learning path**: the skills to learn, in order.\n\
             2. **Timeline**: realistic milestones for my time commitment.\n\
             3. **Resources**: free or low-cost courses, docs and communities.\n\
             4. **Portfolio tips**: projects that prove these skills.\n\
             5. **Job-search tips**: where and how to apply at my level.\n\
             6. **Next steps**: three things I can do this week.",
            experience = self.experience,
            interests = self.interests.join(", "),
            goal = self.goal,
            time = self.time,
        );
        PromptParts {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_prompt,
        }
    }
}
