use crate::scope::VariableScope;
use crate::types::HeaderMap;
use crate::value::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Trimmed dot-path between `{{` and `}}`.
    Token(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn has_tokens(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Token(_)))
    }
}

/// Strict parse: an unterminated `{{` is an error.
pub fn parse_template(input: &str) -> Result<Template, TemplateError> {
    let (segments, unclosed) = split_tokens(input);
    if unclosed {
        return Err(TemplateError::UnclosedToken);
    }
    Ok(Template { segments })
}

/// Substitute every `{{ path }}` token from the scope.
///
/// Missing values become the empty string. An unterminated `{{` is copied through as text.
pub fn resolve(template: &str, scope: &VariableScope) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }
    let (segments, _) = split_tokens(template);
    let mut out = String::with_capacity(template.len());
    for seg in segments {
        match seg {
            Segment::Literal(l) => out.push_str(&l),
            Segment::Token(path) => {
                match scope.lookup(&path) {
                    Some(v) => out.push_str(&render(v)),
                    None => tracing::debug!(token = %path, "template token not in scope"),
                }
            }
        }
    }
    out
}

pub fn resolve_headers(headers: &HeaderMap, scope: &VariableScope) -> HeaderMap {
    headers
        .iter()
        .map(|(k, v)| (k.clone(), resolve(v, scope)))
        .collect()
}

fn split_tokens(input: &str) -> (Vec<Segment>, bool) {
    let mut segments = Vec::new();
    let mut rest = input;
    let mut buf = String::new();

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            buf.push_str(rest);
            if !buf.is_empty() {
                segments.push(Segment::Literal(buf));
            }
            return (segments, true);
        };
        buf.push_str(&rest[..start]);
        if !buf.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut buf)));
        }
        segments.push(Segment::Token(after[..end].trim().to_string()));
        rest = &after[end + 2..];
    }

    buf.push_str(rest);
    if !buf.is_empty() {
        segments.push(Segment::Literal(buf));
    }
    (segments, false)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed template token (missing '}}}}')")]
    UnclosedToken,
}
