use crate::domains::feature::Feature;
use crate::domains::form::FormValues;

pub const THEME_COOKIE: &str = "code_tutor_theme";

/// Transient per-request view of a browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub selected_feature: Feature,
    pub theme_enabled: bool,
    pub values: FormValues,
}

impl UiState {
    pub fn new(selected_feature: Feature) -> Self {
        Self {
            selected_feature,
            theme_enabled: false,
            values: FormValues::new(),
        }
    }

    pub fn with_theme(mut self, theme_enabled: bool) -> Self {
        self.theme_enabled = theme_enabled;
        self
    }

    pub fn with_values(mut self, values: FormValues) -> Self {
        self.values = values;
        self
    }

    pub fn toggle_theme(&mut self) {
        self.theme_enabled = !self.theme_enabled;
    }

    /// `Set-Cookie` value persisting the current theme for the session.
    pub fn theme_cookie(&self) -> String {
        let value = if self.theme_enabled { "dark" } else { "light" };
        format!("{THEME_COOKIE}={value}; Path=/; SameSite=Lax")
    }
}

/// Reads the theme flag from a `Cookie` header, falling back to the
/// `Sec-CH-Prefers-Color-Scheme` client hint, then to light.
pub fn theme_from_request(cookie_header: Option<&str>, color_scheme_hint: Option<&str>) -> bool {
    let from_cookie = cookie_header.and_then(|header| {
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name.trim() != THEME_COOKIE {
                return None;
            }
            match value.trim() {
                "dark" => Some(true),
                "light" => Some(false),
                _ => None,
            }
        })
    });
    from_cookie.unwrap_or_else(|| {
        color_scheme_hint
            .map(|hint| hint.trim().trim_matches('"').eq_ignore_ascii_case("dark"))
            .unwrap_or(false)
    })
}
