use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiChainError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Lint(#[from] LintError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A test definition that cannot be evaluated. Fatal to the step that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectationError {
    #[error("invalid bodyRegex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

#[derive(Debug, Error)]
#[error("test definition failed lint ({violations_len} violations)")]
pub struct LintError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl LintError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
