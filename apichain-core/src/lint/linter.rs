use std::collections::HashSet;

use crate::error::{LintError, Violation};
use crate::expressions::parse_template;
use crate::types::{is_supported_method, ChainStep, Expectation, RequestBody, RequestSpec};
use crate::validate::check_expectation;

pub struct Linter {
    violations: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl Linter {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<Vec<Violation>, LintError> {
        if self.violations.is_empty() {
            Ok(self.warnings)
        } else {
            Err(LintError::new(self.violations))
        }
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Violation::new(path, message));
    }

    pub(crate) fn lint_single(&mut self, req: &RequestSpec) {
        self.lint_request_parts("$", &req.method, &req.url, req.headers.iter(), req.data.as_ref());
        if let Some(expect) = &req.expect {
            self.lint_expectation("$.expect", expect);
        }
    }

    pub(crate) fn lint_chain(&mut self, chain: &[ChainStep]) {
        if chain.is_empty() {
            self.push("$.chain", "must contain at least one step");
            return;
        }

        let mut seen = HashSet::new();
        for (i, step) in chain.iter().enumerate() {
            let path = format!("$.chain[{i}]");
            if step.name.trim().is_empty() {
                self.push(format!("{path}.name"), "must not be empty");
            } else if !seen.insert(step.name.as_str()) {
                self.warn(
                    format!("{path}.name"),
                    format!("duplicate step name '{}'; later results overwrite earlier ones in scope", step.name),
                );
            }

            self.lint_request_parts(&path, &step.method, &step.url, step.headers.iter(), step.data.as_ref());
            if let Some(expect) = &step.expect {
                self.lint_expectation(&format!("{path}.expect"), expect);
            }
            for (var, field) in &step.extract {
                if var.trim().is_empty() {
                    self.push(format!("{path}.extract"), "variable names must not be empty");
                }
                if field.split('.').any(str::is_empty) {
                    self.push(format!("{path}.extract.{var}"), "path must not contain empty segments");
                }
            }
        }
    }

    fn lint_request_parts<'a>(
        &mut self,
        path: &str,
        method: &str,
        url: &str,
        headers: impl Iterator<Item = (&'a String, &'a String)>,
        data: Option<&RequestBody>,
    ) {
        if !is_supported_method(method) {
            self.push(format!("{path}.method"), format!("unsupported HTTP method '{method}'"));
        }
        if url.trim().is_empty() {
            self.push(format!("{path}.url"), "must not be empty");
        }
        self.lint_template(&format!("{path}.url"), url);
        for (k, v) in headers {
            self.lint_template(&format!("{path}.headers.{k}"), v);
        }
        if let Some(RequestBody::Text(text)) = data {
            self.lint_template(&format!("{path}.data"), text);
        }
    }

    fn lint_template(&mut self, path: &str, input: &str) {
        if let Err(e) = parse_template(input) {
            self.push(path, e.to_string());
        }
    }

    fn lint_expectation(&mut self, path: &str, expect: &Expectation) {
        if let Err(e) = check_expectation(expect) {
            self.push(format!("{path}.bodyRegex"), e.to_string());
        }
        if expect.body_regex.is_some() && expect.body.is_some() {
            self.warn(format!("{path}.body"), "ignored because bodyRegex is set");
        }
    }
}
