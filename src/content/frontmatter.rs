use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use spdlog::warn;

use crate::text_utils::DateValue;

pub const DEFAULT_TITLE: &str = "Untitled";

const DELIMITER: &str = "---";

/// Header fields as written. Shapes are checked when each field is resolved,
/// so an odd value only loses that field.
#[derive(Debug, Default, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
}

impl Frontmatter {
    pub fn resolve_title(&self) -> String {
        self.title
            .as_ref()
            .filter(|value| !is_blank(value))
            .and_then(scalar_to_string)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// `None` means the header has no usable date and the caller picks one.
    pub fn resolve_date(&self) -> Option<DateValue> {
        self.date
            .as_ref()
            .filter(|value| !is_blank(value))
            .and_then(scalar_to_string)
            .map(DateValue::Text)
    }

    pub fn resolve_tags(&self) -> Vec<String> {
        match self.tags.as_ref() {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(Value::String(tag)) if !tag.is_empty() => vec![tag.clone()],
            _ => vec![],
        }
    }
}

/// `false`, `0`, `""` and null count as no value at all.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Splits `---` delimited header text from the body. Without a complete
/// header the whole text is the body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(first_end) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_end].trim_end() != DELIMITER {
        return (None, text);
    }

    let header_start = first_end + 1;
    let mut pos = header_start;
    while pos <= text.len() {
        let line_end = text[pos..].find('\n').map(|i| pos + i);
        let line = &text[pos..line_end.unwrap_or(text.len())];
        if line.trim_end() == DELIMITER {
            let header = &text[header_start..pos];
            let body = match line_end {
                Some(end) => &text[end + 1..],
                None => "",
            };
            return (Some(header), body);
        }
        match line_end {
            Some(end) => pos = end + 1,
            None => break,
        }
    }

    (None, text)
}

/// Never fails: a header that is not a YAML mapping is reported and ignored.
pub fn parse_frontmatter<'a>(file_name: &Path, text: &'a str) -> (Frontmatter, &'a str) {
    let (header, body) = split_frontmatter(text);
    let Some(header) = header else {
        return (Frontmatter::default(), body);
    };

    if header.trim().is_empty() {
        return (Frontmatter::default(), body);
    }

    match serde_yaml::from_str::<Frontmatter>(header) {
        Ok(frontmatter) => (frontmatter, body),
        Err(e) => {
            warn!("Invalid frontmatter in {}: {}", file_name.display(), e);
            (Frontmatter::default(), body)
        }
    }
}
