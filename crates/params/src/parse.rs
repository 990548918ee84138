//! Control-file parsing with typed-value inference.
//!
//! The grammar is `key = value [value ...] [# comment]`, one assignment per
//! line. Parsing is lenient: a line that does not fit the grammar is skipped
//! and never reported as an error.

use std::path::Path;

use tracing::trace;

use crate::error::ParamError;
use crate::value::{ParamMap, Value};

/// Outcome of parsing one line.
enum Line<'a> {
    /// Blank line or full-line comment.
    Blank,
    /// Line that does not fit the grammar.
    Skip(&'static str),
    /// A `key = value` assignment.
    Assign(&'a str, Value),
}

/// Parse control-file text into an ordered parameter mapping.
///
/// Later assignments to the same key replace earlier ones but keep the
/// key's first position.
pub fn parse_str(text: &str) -> ParamMap {
    let mut params = ParamMap::new();

    for (lineno, raw) in text.lines().enumerate() {
        match parse_line(raw) {
            Line::Blank => {}
            Line::Skip(reason) => {
                trace!(line = lineno + 1, reason, "skipping control-file line");
            }
            Line::Assign(key, value) => {
                params.insert(key.to_string(), value);
            }
        }
    }

    params
}

/// Parse a control file from disk.
///
/// # Errors
///
/// Returns [`ParamError::FileNotFound`] if the file does not exist, or
/// [`ParamError::Io`] if it cannot be read.
pub fn parse_file(path: &Path) -> Result<ParamMap, ParamError> {
    let text = std::fs::read_to_string(path).map_err(|e| ParamError::io(path, &e))?;
    Ok(parse_str(&text))
}

fn parse_line(raw: &str) -> Line<'_> {
    let stripped = raw.trim();
    if stripped.is_empty() || stripped.starts_with('#') {
        return Line::Blank;
    }

    let Some((key_part, value_part)) = stripped.split_once('=') else {
        return Line::Skip("no '='");
    };
    let key = key_part.trim();
    if key.is_empty() {
        return Line::Skip("empty key");
    }

    let value = strip_inline_comment(value_part).trim();
    if value.is_empty() {
        return Line::Assign(key, Value::Str(String::new()));
    }

    // A value that is exactly one quoted string stays one token, spaces and all.
    if value.len() >= 2
        && value.starts_with('"')
        && value.ends_with('"')
        && value.matches('"').count() == 2
    {
        return Line::Assign(key, Value::Str(value[1..value.len() - 1].to_string()));
    }

    let mut tokens: Vec<Value> = value
        .split_whitespace()
        .map(|tok| infer_token(strip_quotes(tok)))
        .collect();

    if tokens.len() == 1 {
        Line::Assign(key, tokens.remove(0))
    } else {
        Line::Assign(key, Value::List(tokens))
    }
}

/// Cut an unquoted `# comment` from the value portion of a line.
fn strip_inline_comment(value: &str) -> &str {
    let mut in_quotes = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &value[..i],
            _ => {}
        }
    }
    value
}

fn strip_quotes(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Infer the type of one token: boolean, then integer, then float, then
/// string.
pub fn infer_token(token: &str) -> Value {
    match token {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if is_integer_literal(token)
        && let Ok(n) = token.parse::<i64>()
    {
        return Value::Int(n);
    }

    match token.parse::<f64>() {
        Ok(x) => Value::Float(x),
        Err(_) => Value::Str(token.to_string()),
    }
}

/// Optional sign followed by one or more ASCII digits.
fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
