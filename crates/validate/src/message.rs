//! Validation findings.

use std::fmt;

/// How serious a finding is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Harmless but probably not what the user meant.
    Info,
    /// The run will start but may misbehave.
    Warning,
    /// The solver will reject the configuration.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One finding produced by a validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
    /// Parameter keys the finding refers to.
    pub parameter_keys: Vec<String>,
    /// Stable identifier of the rule that produced the finding.
    pub rule_id: &'static str,
}

impl ValidationMessage {
    pub fn new(
        severity: Severity,
        rule_id: &'static str,
        message: impl Into<String>,
        keys: &[&str],
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            parameter_keys: keys.iter().map(|k| k.to_string()).collect(),
            rule_id,
        }
    }

    pub(crate) fn error(rule_id: &'static str, message: impl Into<String>, keys: &[&str]) -> Self {
        Self::new(Severity::Error, rule_id, message, keys)
    }

    pub(crate) fn warning(
        rule_id: &'static str,
        message: impl Into<String>,
        keys: &[&str],
    ) -> Self {
        Self::new(Severity::Warning, rule_id, message, keys)
    }

    pub(crate) fn info(rule_id: &'static str, message: impl Into<String>, keys: &[&str]) -> Self {
        Self::new(Severity::Info, rule_id, message, keys)
    }
}

impl fmt::Display for ValidationMessage {
    /// `[R004] error: <message> (remora.prob_lo, remora.prob_hi)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule_id, self.severity, self.message)?;
        if !self.parameter_keys.is_empty() {
            write!(f, " ({})", self.parameter_keys.join(", "))?;
        }
        Ok(())
    }
}

/// Returns `true` if any message has [`Severity::Error`].
pub fn has_errors(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(|m| m.severity == Severity::Error)
}
