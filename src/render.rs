//! Server-side HTML for the tutor page.
//!
//! Model output is rendered as markdown with raw HTML escaped and fenced code
//! blocks highlighted by `syntect`. Everything user-supplied is escaped before
//! it lands in the page.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use pulldown_cmark_escape::FmtWriter;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::domains::feature::{Feature, FieldKind, FieldSpec};
use crate::domains::form::FormValues;
use crate::domains::ui_state::UiState;
use crate::prompts;
use crate::services::tutor::Submission;

pub const APP_TITLE: &str = "AI Code Tutor";
pub const TAGLINE: &str = "Helping African learners unlock coding skills with AI ✨";
pub const FOOTER: &str = "Empowering Next Generation of Developer in Africa🌍 | © 2025 CodeTutor";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark_escape::escape_html(FmtWriter(&mut out), input);
    out
}

fn highlight_code(code: &str, language: &str, dark: bool) -> String {
    let plain = || format!("<pre class=\"code\"><code>{}</code></pre>", escape_html(code));
    let token = language.split_whitespace().next().unwrap_or("");
    if token.is_empty() {
        return plain();
    }
    let Some(syntax) = SYNTAX_SET.find_syntax_by_token(token) else {
        return plain();
    };
    let theme_name = if dark { "base16-ocean.dark" } else { "InspiredGitHub" };
    let Some(theme) = THEMES
        .themes
        .get(theme_name)
        .or_else(|| THEMES.themes.values().next())
    else {
        return plain();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::from("<pre class=\"code\"><code>");
    for line in LinesWithEndings::from(code) {
        let Ok(ranges) = highlighter.highlight_line(line, &SYNTAX_SET) else {
            return plain();
        };
        let Ok(html) = styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No) else {
            return plain();
        };
        out.push_str(&html);
    }
    out.push_str("</code></pre>");
    out
}

/// Renders model markdown. Raw HTML from the model is shown as text.
pub fn markdown_to_html(input: &str, dark: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut events = Vec::new();
    let mut code_block: Option<(String, String)> = None;
    for event in Parser::new_ext(input, options) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_block = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = code_block.take() {
                    events.push(Event::Html(CowStr::from(highlight_code(
                        &code, &language, dark,
                    ))));
                }
            }
            Event::Text(text) if code_block.is_some() => {
                if let Some((_, code)) = code_block.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            other => events.push(other),
        }
    }

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

/// Everything needed to draw one page.
pub struct PageView<'a> {
    pub state: &'a UiState,
    pub outcome: Option<&'a Submission>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let state = view.state;
    let feature = state.selected_feature;
    let mut page = String::with_capacity(8 * 1024);

    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title} · {label}</title>\n<style>{css}</style>\n</head>\n<body class=\"{theme}\">\n",
        title = APP_TITLE,
        label = feature.label(),
        css = STYLE,
        theme = if state.theme_enabled { "dark" } else { "light" },
    );

    render_sidebar(&mut page, state);

    let _ = write!(
        page,
        "<main>\n<h1>{title}</h1>\n<p class=\"tagline\">{tagline}</p>\n<h2>{heading}</h2>\n",
        title = APP_TITLE,
        tagline = TAGLINE,
        heading = feature.heading(),
    );
    render_form(&mut page, feature, &state.values);
    if let Some(outcome) = view.outcome {
        render_outcome(&mut page, outcome, state.theme_enabled);
    }
    let _ = write!(
        page,
        "<footer><hr><p>{footer}</p></footer>\n</main>\n</body>\n</html>\n",
        footer = FOOTER,
    );
    page
}

fn render_sidebar(page: &mut String, state: &UiState) {
    let path = format!("/features/{}", state.selected_feature.slug());
    let toggle_label = if state.theme_enabled {
        "Disable Dark Mode"
    } else {
        "Enable Dark Mode"
    };
    let _ = write!(
        page,
        "<aside class=\"sidebar\">\n<h3>🌓 Theme</h3>\n\
         <form method=\"post\" action=\"/theme\">\
         <input type=\"hidden\" name=\"return_to\" value=\"{path}\">\
         <button type=\"submit\" class=\"toggle\">{toggle_label}</button></form>\n\
         <h3>Features</h3>\n<nav>\n",
    );
    for feature in Feature::ALL {
        let class = if feature == state.selected_feature {
            " class=\"active\""
        } else {
            ""
        };
        let _ = writeln!(
            page,
            "<a href=\"/features/{slug}\"{class}>{label}</a>",
            slug = feature.slug(),
            label = feature.label(),
        );
    }
    page.push_str("</nav>\n</aside>\n");
}

fn render_form(page: &mut String, feature: Feature, values: &FormValues) {
    let _ = writeln!(
        page,
        "<form method=\"post\" action=\"/features/{}\" class=\"feature-form\">",
        feature.slug()
    );
    for field in prompts::fields(feature) {
        render_field(page, field, values);
    }
    let _ = writeln!(
        page,
        "<button type=\"submit\">{}</button>\n</form>",
        feature.submit_label()
    );
}

fn render_field(page: &mut String, field: &FieldSpec, values: &FormValues) {
    let required = if field.required { " required" } else { "" };
    let _ = write!(
        page,
        "<label for=\"{name}\">{label}</label>\n",
        name = field.name,
        label = escape_html(field.label),
    );
    match field.kind {
        FieldKind::TextArea => {
            let _ = writeln!(
                page,
                "<textarea id=\"{name}\" name=\"{name}\" rows=\"10\" placeholder=\"{placeholder}\"{required}>{value}</textarea>",
                name = field.name,
                placeholder = escape_html(field.placeholder),
                value = escape_html(values.raw(field.name)),
            );
        }
        FieldKind::Text => {
            let _ = writeln!(
                page,
                "<input type=\"text\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{value}\"{required}>",
                name = field.name,
                placeholder = escape_html(field.placeholder),
                value = escape_html(values.raw(field.name)),
            );
        }
        FieldKind::Select(options) => {
            let current = values.choice(field.name, options);
            let _ = writeln!(page, "<select id=\"{0}\" name=\"{0}\">", field.name);
            for option in options {
                push_option(page, option, *option == current);
            }
            page.push_str("</select>\n");
        }
        FieldKind::GroupedSelect(groups) => {
            let current = values.text(field.name);
            let _ = writeln!(page, "<select id=\"{0}\" name=\"{0}\">", field.name);
            push_option_with_label(page, "", "-- choose a subtopic --", current.is_empty());
            for (group, options) in groups {
                let _ = writeln!(page, "<optgroup label=\"{}\">", escape_html(group));
                for option in options.iter() {
                    push_option(page, option, option.eq_ignore_ascii_case(current));
                }
                page.push_str("</optgroup>\n");
            }
            page.push_str("</select>\n");
        }
        FieldKind::MultiSelect(options) => {
            let _ = writeln!(
                page,
                "<select id=\"{0}\" name=\"{0}\" multiple size=\"{1}\"{required}>",
                field.name,
                options.len().min(6),
            );
            for option in options {
                push_option(page, option, values.contains(field.name, option));
            }
            page.push_str("</select>\n");
        }
    }
}

fn push_option(page: &mut String, value: &str, selected: bool) {
    push_option_with_label(page, value, value, selected);
}

fn push_option_with_label(page: &mut String, value: &str, label: &str, selected: bool) {
    let _ = writeln!(
        page,
        "<option value=\"{}\"{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label),
    );
}

fn render_outcome(page: &mut String, outcome: &Submission, dark: bool) {
    match outcome {
        Submission::Answered { feature, text } => {
            let _ = write!(
                page,
                "<section class=\"result\">\n<p class=\"success\">{caption}</p>\n\
                 <div class=\"markdown\">{body}</div>\n</section>\n",
                caption = escape_html(feature.success_caption()),
                body = markdown_to_html(text, dark),
            );
        }
        Submission::Failed { message, .. } => {
            let _ = write!(
                page,
                "<section class=\"error\" role=\"alert\">\n<p><strong>Something went wrong.</strong> \
                 The tutor could not get an answer, please try again.</p>\n\
                 <pre>{}</pre>\n</section>\n",
                escape_html(message),
            );
        }
        Submission::Incomplete(missing) => {
            let _ = write!(
                page,
                "<section class=\"warning\" role=\"alert\"><p>{}</p></section>\n",
                escape_html(&missing.to_string()),
            );
        }
    }
}

const STYLE: &str = r#"
:root { --bg: #ffffff; --panel: #f0f2f6; --text: #31333f; --muted: #6b6f7b;
        --input: #ffffff; --border: #d6d9e0; --accent: #4CAF50;
        --error: #d93025; --warning: #b26a00; }
body.dark { --bg: #0e1117; --panel: #1a1c24; --text: #FAFAFA; --muted: #a3a8b8;
            --input: #262730; --border: #3a3d4a; }
* { box-sizing: border-box; }
body { margin: 0; display: flex; min-height: 100vh; background: var(--bg); color: var(--text);
       font-family: system-ui, -apple-system, "Segoe UI", sans-serif; }
.sidebar { width: 240px; padding: 24px 16px; background: var(--panel); }
.sidebar nav a { display: block; padding: 8px 10px; border-radius: 6px; color: var(--text);
                 text-decoration: none; }
.sidebar nav a.active { background: var(--accent); color: #fff; }
main { flex: 1; max-width: 900px; padding: 32px 48px; }
.tagline { color: var(--muted); }
label { display: block; margin: 14px 0 6px; font-size: 0.9rem; }
textarea, input[type=text], select { width: 100%; padding: 8px; border-radius: 6px;
    border: 1px solid var(--border); background: var(--input); color: var(--text);
    font: inherit; }
textarea { font-family: ui-monospace, "SFMono-Regular", Consolas, monospace; }
button { margin-top: 16px; padding: 8px 18px; border: 0; border-radius: 6px;
         background: var(--accent); color: #fff; cursor: pointer; }
button.toggle { margin-top: 0; width: 100%; }
.result, .error, .warning { margin-top: 24px; padding: 16px 20px; border-radius: 8px;
                            background: var(--panel); }
.success { color: var(--accent); font-weight: 600; }
.error { border-left: 4px solid var(--error); }
.warning { border-left: 4px solid var(--warning); }
pre { overflow-x: auto; }
pre.code { padding: 12px; border-radius: 6px; background: var(--input);
           border: 1px solid var(--border); }
footer { margin-top: 48px; color: var(--muted); font-size: 0.85rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::MissingFields;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn prose_punctuation_is_left_as_written() {
        let html = markdown_to_html(
            "Use \"git add\" -- don't forget... then `git push --force`.",
            false,
        );
        assert!(html.contains("git add") && !html.contains('\u{201C}'), "{html}");
        assert!(html.contains("-- don't forget..."), "{html}");
        assert!(html.contains("<code>git push --force</code>"), "{html}");
        for curly in ['\u{2013}', '\u{2019}', '\u{2026}'] {
            assert!(!html.contains(curly), "{html}");
        }
    }

    #[test]
    fn markdown_renders_and_neutralises_raw_html() {
        let html = markdown_to_html("# Loops\n\n<script>alert(1)</script>\n\n**bold**", false);
        assert!(html.contains("<h1>Loops</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn fenced_code_is_highlighted_or_escaped() {
        let html = markdown_to_html("```python\nprint(\"<hi>\")\n```", false);
        assert!(html.contains("<pre class=\"code\"><code>"));
        assert!(html.contains("span"));
        assert!(!html.contains("<hi>"));

        let plain = markdown_to_html("```nosuchlang\na < b\n```", true);
        assert!(plain.contains("<pre class=\"code\"><code>a &lt; b\n</code></pre>"));
    }

    #[test]
    fn page_lists_every_feature_and_marks_the_active_one() {
        let state = UiState::new(Feature::QuizGenerator);
        let page = render_page(&PageView {
            state: &state,
            outcome: None,
        });
        for feature in Feature::ALL {
            assert!(page.contains(feature.label()));
        }
        assert!(page.contains("<a href=\"/features/quiz-generator\" class=\"active\">"));
        assert!(page.contains("Generate a Quiz"));
        assert!(page.contains(FOOTER));
        assert!(!page.contains("class=\"result\""));
    }

    #[test]
    fn submitted_values_are_echoed_escaped() {
        let values = FormValues::from_pairs([
            ("code", "if a < b:\n    pass"),
            ("language", "Go"),
        ]);
        let state = UiState::new(Feature::CodeExplainer).with_values(values);
        let page = render_page(&PageView {
            state: &state,
            outcome: None,
        });
        assert!(page.contains("if a &lt; b:\n    pass</textarea>"));
        assert!(page.contains("<option value=\"Go\" selected>Go</option>"));
    }

    #[test]
    fn outcomes_render_their_panels() {
        let state = UiState::new(Feature::MiniLessons);
        let answered = Submission::Answered {
            feature: Feature::MiniLessons,
            text: "A *loop* repeats.".to_string(),
        };
        let page = render_page(&PageView {
            state: &state,
            outcome: Some(&answered),
        });
        assert!(page.contains("Here's your lesson"));
        assert!(page.contains("A <em>loop</em> repeats."));

        let failed = Submission::Failed {
            feature: Feature::MiniLessons,
            message: "upstream failure: <timeout>".to_string(),
        };
        let page = render_page(&PageView {
            state: &state,
            outcome: Some(&failed),
        });
        assert!(page.contains("Something went wrong."));
        assert!(page.contains("upstream failure: &lt;timeout&gt;"));

        let missing = Submission::Incomplete(MissingFields(vec!["Topic"]));
        let page = render_page(&PageView {
            state: &state,
            outcome: Some(&missing),
        });
        assert!(page.contains("Please fill in: Topic"));
    }

    #[test]
    fn theme_toggled_twice_renders_identically() {
        let mut state = UiState::new(Feature::CareerGuide);
        let before = render_page(&PageView {
            state: &state,
            outcome: None,
        });
        state.toggle_theme();
        let dark = render_page(&PageView {
            state: &state,
            outcome: None,
        });
        assert!(dark.contains("<body class=\"dark\">"));
        assert_ne!(before, dark);
        state.toggle_theme();
        let after = render_page(&PageView {
            state: &state,
            outcome: None,
        });
        assert_eq!(before, after);
    }
}
