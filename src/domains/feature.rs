use serde::{Deserialize, Serialize};

/// The five tutor features offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    CodeExplainer,
    DebuggingAssistant,
    MiniLessons,
    QuizGenerator,
    CareerGuide,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::CodeExplainer,
        Feature::DebuggingAssistant,
        Feature::MiniLessons,
        Feature::QuizGenerator,
        Feature::CareerGuide,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::CodeExplainer => "code-explainer",
            Self::DebuggingAssistant => "debugging-assistant",
            Self::MiniLessons => "mini-lessons",
            Self::QuizGenerator => "quiz-generator",
            Self::CareerGuide => "career-guide",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.slug() == slug.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CodeExplainer => "Code Explainer",
            Self::DebuggingAssistant => "Debugging Assistant",
            Self::MiniLessons => "Mini Lessons",
            Self::QuizGenerator => "Quiz Generator",
            Self::CareerGuide => "Career Guide",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::CodeExplainer => "Explain Code",
            Self::DebuggingAssistant => "Debug My Code",
            Self::MiniLessons => "On-Demand Mini Lessons",
            Self::QuizGenerator => "Generate a Quiz",
            Self::CareerGuide => "Ask for Career Advice",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::CodeExplainer => "Explain",
            Self::DebuggingAssistant => "Find and Fix Bugs",
            Self::MiniLessons => "Teach Me",
            Self::QuizGenerator => "Generate Quiz",
            Self::CareerGuide => "Advise Me",
        }
    }

    /// Caption shown above a successful result.
    pub fn success_caption(self) -> &'static str {
        match self {
            Self::CodeExplainer => "Done!",
            Self::DebuggingAssistant => "Bugfix suggestions ready!",
            Self::MiniLessons => "Here's your lesson",
            Self::QuizGenerator => "Quiz ready!",
            Self::CareerGuide => "Here's some advice:",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Grouped options for a select rendered with `<optgroup>`s.
pub type OptionGroups = &'static [(&'static str, &'static [&'static str])];

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    TextArea,
    Text,
    Select(&'static [&'static str]),
    GroupedSelect(OptionGroups),
    MultiSelect(&'static [&'static str]),
}

/// One input of a feature form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn text_area(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::TextArea,
            placeholder: "",
            required: false,
        }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            placeholder: "",
            required: false,
        }
    }

    pub const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select(options),
            placeholder: "",
            required: false,
        }
    }

    pub const fn grouped(name: &'static str, label: &'static str, groups: OptionGroups) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::GroupedSelect(groups),
            placeholder: "",
            required: false,
        }
    }

    pub const fn multi(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::MultiSelect(options),
            placeholder: "",
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}
