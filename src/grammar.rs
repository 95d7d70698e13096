//! Fixture serialization grammar
//!
//! The textual encoding shared by the fixture writer (expected output) and
//! the generated harness (decode input / encode result). A fixture line may
//! be a bare value or a `name = value` assignment; sequences are
//! bracket-delimited and comma-separated; a binary tree uses a level-order
//! bracket form with `null` for absent children, and a singly linked list
//! shares the flat integer-sequence form.
//!
//! The round-trip contract every comparison depends on:
//! `encode(decode(s)) == normalize(s)` and `decode(encode(v)) == v` for
//! every supported type.

use thiserror::Error;

use crate::harness::signature::TypeTag;

/// Errors produced while decoding fixture text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("invalid integer literal '{0}'")]
    InvalidInt(String),

    #[error("invalid float literal '{0}'")]
    InvalidFloat(String),

    #[error("invalid boolean literal '{0}'")]
    InvalidBool(String),

    #[error("empty character value")]
    EmptyChar,

    #[error("cannot decode unsupported type '{0}'")]
    Unsupported(String),
}

/// A decoded fixture value.
///
/// Linked structures carry their serialized shape rather than pointers: a
/// list is its flat integer sequence, a tree its level-order cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
    IntList(Vec<i64>),
    StrList(Vec<String>),
    IntMatrix(Vec<Vec<i64>>),
    Tree(Vec<Option<i64>>),
}

/// Decode one fixture value of the given type from raw text.
pub fn decode(raw: &str, tag: &TypeTag) -> Result<Value, GrammarError> {
    let value = strip_assignment(raw);
    match tag {
        TypeTag::Int => Ok(Value::Int(parse_int(value)?)),
        TypeTag::Float => value
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| GrammarError::InvalidFloat(value.to_string())),
        TypeTag::Bool => match value {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            other => Err(GrammarError::InvalidBool(other.to_string())),
        },
        TypeTag::Char => strip_quotes(value)
            .chars()
            .next()
            .map(Value::Char)
            .ok_or(GrammarError::EmptyChar),
        TypeTag::Str => Ok(Value::Str(strip_quotes(value).to_string())),
        TypeTag::IntList | TypeTag::LinkedList => Ok(Value::IntList(parse_int_list(value)?)),
        TypeTag::StrList => {
            let items = split_top_level(strip_brackets(value))
                .into_iter()
                .map(|part| strip_quotes(part.trim()).to_string())
                .collect();
            Ok(Value::StrList(items))
        }
        TypeTag::IntMatrix => {
            let rows = split_groups(strip_brackets(value))
                .into_iter()
                .map(|group| parse_int_list(group.trim()))
                .collect::<Result<_, _>>()?;
            Ok(Value::IntMatrix(rows))
        }
        TypeTag::Tree => {
            let cells = split_top_level(strip_brackets(value))
                .into_iter()
                .map(|part| {
                    let part = part.trim();
                    if part.eq_ignore_ascii_case("null") || part == "#" {
                        Ok(None)
                    } else {
                        parse_int(part).map(Some)
                    }
                })
                .collect::<Result<_, _>>()?;
            Ok(Value::Tree(cells))
        }
        TypeTag::Unsupported(raw_type) => Err(GrammarError::Unsupported(raw_type.clone())),
    }
}

/// Encode a value back into canonical fixture text.
///
/// Sequences render with explicit brackets and comma separation (no interior
/// whitespace), strings render quoted, booleans as the literal words; other
/// scalars use their natural textual form.
pub fn encode(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Bool(v) => if *v { "true" } else { "false" }.to_string(),
        Value::Char(v) => v.to_string(),
        Value::Str(v) => format!("\"{}\"", v),
        Value::IntList(items) => bracketed(items.iter().map(|v| v.to_string())),
        Value::StrList(items) => bracketed(items.iter().map(|v| format!("\"{}\"", v))),
        Value::IntMatrix(rows) => {
            bracketed(rows.iter().map(|row| bracketed(row.iter().map(|v| v.to_string()))))
        }
        Value::Tree(cells) => bracketed(cells.iter().map(|cell| match cell {
            Some(v) => v.to_string(),
            None => "null".to_string(),
        })),
    }
}

/// Normalize fixture text for comparison: strip any `name =` prefix and all
/// whitespace outside of quoted sections.
pub fn normalize(raw: &str) -> String {
    let value = strip_assignment(raw);
    let mut out = String::with_capacity(value.len());
    let mut quote: Option<char> = None;
    for c in value.chars() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                    out.push(c);
                } else if !c.is_whitespace() {
                    out.push(c);
                }
            }
        }
    }
    out
}

/// Extract the value part of a line: everything after the first `=`, trimmed.
pub fn strip_assignment(raw: &str) -> &str {
    match raw.find('=') {
        Some(pos) => raw[pos + 1..].trim(),
        None => raw.trim(),
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    let mut chars = s.chars();
    match (chars.next(), s.chars().last()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close && s.len() >= 2 => {
            &s[1..s.len() - 1]
        }
        _ => s,
    }
}

fn strip_brackets(s: &str) -> &str {
    let s = s.trim();
    match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) => inner,
        None => s,
    }
}

fn parse_int(s: &str) -> Result<i64, GrammarError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| GrammarError::InvalidInt(s.trim().to_string()))
}

fn parse_int_list(s: &str) -> Result<Vec<i64>, GrammarError> {
    split_top_level(strip_brackets(s))
        .into_iter()
        .map(|part| parse_int(&part))
        .collect()
}

/// Split on commas at bracket depth zero, respecting quoted sections.
pub fn split_top_level(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for c in s.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.clone());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}

/// Split a matrix body into its `[...]` groups, tolerating both comma and
/// adjacency separation between rows.
fn split_groups(s: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth -= 1;
                current.push(c);
                if depth == 0 {
                    groups.push(current.clone());
                    current.clear();
                }
            }
            _ if depth > 0 => current.push(c),
            _ => {}
        }
    }
    groups
}

fn bracketed(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(","))
}
