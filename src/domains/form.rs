use serde_json::Value;
use std::collections::BTreeMap;

/// Submitted widget values. A name may repeat for multi-selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = Self::new();
        for (name, value) in pairs {
            values.push(name, value);
        }
        values
    }

    /// Accepts a JSON object whose members are strings, numbers, booleans or
    /// arrays of those. Anything else is ignored.
    pub fn from_json(value: &Value) -> Self {
        let mut values = Self::new();
        let Some(object) = value.as_object() else {
            return values;
        };
        for (name, member) in object {
            match member {
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = scalar_text(item) {
                            values.push(name.as_str(), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_text(other) {
                        values.push(name.as_str(), text);
                    }
                }
            }
        }
        values
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// First value for `name`, trimmed; empty when absent.
    pub fn text(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim())
            .unwrap_or("")
    }

    /// First value for `name` exactly as submitted.
    pub fn raw(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Every non-blank value for `name`, trimmed, in submission order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.fields
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolves a single-select against its offered options, falling back to
    /// the first option for missing or unknown values.
    pub fn choice(&self, name: &str, options: &[&'static str]) -> &'static str {
        let submitted = self.text(name);
        options
            .iter()
            .copied()
            .find(|option| option.eq_ignore_ascii_case(submitted))
            .or_else(|| options.first().copied())
            .unwrap_or("")
    }

    /// Like [`FormValues::choice`] for multi-selects; unknown values are dropped.
    pub fn choices(&self, name: &str, options: &[&'static str]) -> Vec<&'static str> {
        let mut picked = Vec::new();
        for submitted in self.all(name) {
            if let Some(option) = options
                .iter()
                .copied()
                .find(|option| option.eq_ignore_ascii_case(submitted))
            {
                if !picked.contains(&option) {
                    picked.push(option);
                }
            }
        }
        picked
    }

    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.all(name)
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(value.trim()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|values| values.is_empty())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
