//! Signature extraction
//!
//! Locates the one solution function inside a C++ source blob and parses its
//! return type, name and ordered parameter list. This is deliberately not a
//! C++ parser: a single declaration-shaped match over a closed type
//! vocabulary is all the harness needs.

use regex::Regex;

use super::GenError;

/// The closed vocabulary of fixture-decodable types.
///
/// Anything else degrades to `Unsupported`, which still produces a
/// `ParsedSignature` but emits a compile-visible placeholder downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    Char,
    Str,
    IntList,
    StrList,
    IntMatrix,
    LinkedList,
    Tree,
    Unsupported(String),
}

impl TypeTag {
    /// Classify a raw C++ type token.
    pub fn from_cpp(raw: &str) -> TypeTag {
        // Collapse whitespace and drop decorations that don't change the
        // decode strategy: const, references, std:: qualification.
        let compact: String = raw
            .replace("std::", "")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let compact = compact
            .strip_prefix("const")
            .unwrap_or(&compact)
            .trim_end_matches('&');

        match compact {
            "int" | "long" | "longlong" => TypeTag::Int,
            "double" | "float" => TypeTag::Float,
            "bool" => TypeTag::Bool,
            "char" => TypeTag::Char,
            "string" => TypeTag::Str,
            "vector<int>" => TypeTag::IntList,
            "vector<string>" => TypeTag::StrList,
            "vector<vector<int>>" => TypeTag::IntMatrix,
            "ListNode*" => TypeTag::LinkedList,
            "TreeNode*" => TypeTag::Tree,
            _ => TypeTag::Unsupported(raw.trim().to_string()),
        }
    }

    /// The C++ spelling used for locals of this type in generated code.
    pub fn cpp_type(&self) -> String {
        match self {
            TypeTag::Int => "int".to_string(),
            TypeTag::Float => "double".to_string(),
            TypeTag::Bool => "bool".to_string(),
            TypeTag::Char => "char".to_string(),
            TypeTag::Str => "string".to_string(),
            TypeTag::IntList => "vector<int>".to_string(),
            TypeTag::StrList => "vector<string>".to_string(),
            TypeTag::IntMatrix => "vector<vector<int>>".to_string(),
            TypeTag::LinkedList => "ListNode*".to_string(),
            TypeTag::Tree => "TreeNode*".to_string(),
            TypeTag::Unsupported(raw) => raw.clone(),
        }
    }
}

/// One parsed parameter: its classified type and local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub tag: TypeTag,
    pub name: String,
}

/// A solution function's parsed signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    pub return_tag: TypeTag,
    /// Return type as written in the source
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
    /// Whether the function is declared inside a `class Solution` block, in
    /// which case the generated call site constructs an instance.
    pub is_member: bool,
}

/// Type tokens recognized at the head of a declaration, longest-first so
/// `vector<vector<int>>` wins over `vector<int>`.
const DECL_PATTERN: &str = r"(?m)^[ \t]*(?:(?:static|inline|virtual|constexpr)\s+)*(vector\s*<\s*vector\s*<\s*int\s*>\s*>|vector\s*<\s*int\s*>|vector\s*<\s*string\s*>|ListNode\s*\*|TreeNode\s*\*|long\s+long|int|long|double|float|bool|char|string)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)";

/// Extract the first solution-function signature from raw source text.
///
/// Fails with [`GenError::SignatureNotFound`] when no declaration matches the
/// type vocabulary; there is no partial harness without a callable target.
pub fn extract(source: &str) -> Result<ParsedSignature, GenError> {
    let decl_re = Regex::new(DECL_PATTERN).expect("INVARIANT: declaration pattern is valid");
    let member_re = Regex::new(r"class\s+Solution\b").expect("INVARIANT: class pattern is valid");

    let caps = decl_re.captures(source).ok_or(GenError::SignatureNotFound)?;
    let return_type = caps[1].trim().to_string();
    let name = caps[2].to_string();
    let params = parse_params(&caps[3]);

    Ok(ParsedSignature {
        return_tag: TypeTag::from_cpp(&return_type),
        return_type,
        name,
        params,
        is_member: member_re.is_match(source),
    })
}

/// Split a parameter list on top-level commas and parse each entry.
fn parse_params(list: &str) -> Vec<Param> {
    split_params(list)
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| parse_param(&raw, i))
        .collect()
}

/// Split on commas that are not nested inside angle brackets or parentheses.
fn split_params(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '<' | '(' => {
                depth += 1;
                current.push(c);
            }
            '>' | ')' => {
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

/// Parse one `type name` entry. The last whitespace-delimited token (with
/// reference/pointer decoration stripped) is the name; everything before it
/// is the type. A nameless parameter gets a synthesized positional name.
fn parse_param(raw: &str, index: usize) -> Option<Param> {
    // Drop any default value
    let raw = raw.split('=').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 2 {
        return Some(Param {
            tag: TypeTag::from_cpp(raw),
            name: format!("arg{}", index),
        });
    }

    let last = tokens[tokens.len() - 1];
    let name = last.trim_start_matches(['&', '*']);
    if name.is_empty() {
        return Some(Param {
            tag: TypeTag::from_cpp(raw),
            name: format!("arg{}", index),
        });
    }

    // Pointer/reference glyphs attached to the name belong to the type
    let decoration: String = last.chars().take_while(|c| *c == '&' || *c == '*').collect();
    let mut type_str = tokens[..tokens.len() - 1].join(" ");
    type_str.push_str(&decoration);

    Some(Param {
        tag: TypeTag::from_cpp(&type_str),
        name: name.to_string(),
    })
}
