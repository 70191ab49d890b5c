//! # Argument Parsing
//!
//! Commands receive whatever text follows their `group action` prefix. Commands that
//! take options use the `--name[=value]` micro-syntax parsed here:
//!
//! ```text
//! --flag              → flag (boolean true)
//! --name=value        → "value" (ends at whitespace or a double quote)
//! --name="two words"  → "two words" (ends at the next double quote)
//! --name=             → "" (empty, never a flag)
//! ```
//!
//! Scanning is permissive: anything that is not a `--name` token is skipped, and no
//! input is ever rejected. Escaped quotes inside a quoted value are not supported.
//!
//! Positional values are not extracted by [`parse`]. [`extract`] isolates them per
//! command according to its [`ArgShape`].

use crate::catalog::ArgShape;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Bare `--name` with no `=`.
    Flag,
    Text(String),
}

impl ArgValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Flag => None,
            ArgValue::Text(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    pub positional: Vec<String>,
    pub named: HashMap<String, ArgValue>,
}

impl ParsedArguments {
    pub fn with_positional<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            positional: tokens.into_iter().map(Into::into).collect(),
            named: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.named.get(name)
    }

    /// Value of a named argument, ignoring bare flags.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.named.get(name).and_then(ArgValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }
}

/// Parse every `--name[=value]` token in `input`, left to right. Later
/// occurrences of a name replace earlier ones.
pub fn parse(input: &str) -> ParsedArguments {
    let mut parsed = ParsedArguments::default();
    let mut pos = 0;

    while let Some(offset) = input[pos..].find("--") {
        let dashes = pos + offset;
        match scan_named(input, dashes + 2) {
            Some((name, value, end)) => {
                parsed.named.insert(name, value);
                pos = end;
            }
            // Not a name start; retry from the second dash so `---name` still matches.
            None => pos = dashes + 1,
        }
    }

    parsed
}

/// Build the arguments for a command from the text after its `group action` prefix.
pub fn extract(shape: ArgShape, rest: &str) -> ParsedArguments {
    let rest = rest.trim();
    match shape {
        ArgShape::Nothing => ParsedArguments::default(),
        ArgShape::Named => parse(rest),
        ArgShape::Single if rest.is_empty() => ParsedArguments::default(),
        ArgShape::Single => ParsedArguments::with_positional([rest]),
        ArgShape::Words => ParsedArguments::with_positional(rest.split_whitespace()),
        ArgShape::NameValue => match split_name_value(rest) {
            None => ParsedArguments::default(),
            Some((name, None)) => ParsedArguments::with_positional([name]),
            Some((name, Some(value))) => ParsedArguments::with_positional([name, unquote(value)]),
        },
    }
}

fn split_name_value(input: &str) -> Option<(&str, Option<&str>)> {
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => {
            let value = input[end..].trim_start();
            Some((&input[..end], (!value.is_empty()).then_some(value)))
        }
        None => Some((input, None)),
    }
}

/// Strip one pair of enclosing double quotes, so `""` is an explicit empty value.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Scan a name (and optional value) starting right after `--`.
/// Returns the name, its value, and the byte offset where scanning resumes.
fn scan_named(input: &str, start: usize) -> Option<(String, ArgValue, usize)> {
    let bytes = input.as_bytes();
    if !bytes.get(start).copied().is_some_and(is_word_byte) {
        return None;
    }

    let mut end = start + 1;
    while bytes
        .get(end)
        .copied()
        .is_some_and(|b| is_word_byte(b) || b == b'-')
    {
        end += 1;
    }
    let name = input[start..end].to_string();

    if bytes.get(end) != Some(&b'=') {
        return Some((name, ArgValue::Flag, end));
    }

    let value_start = end + 1;
    let rest = &input[value_start..];

    if let Some(quoted) = rest.strip_prefix('"') {
        return match quoted.find('"') {
            Some(close) => {
                let value = quoted[..close].to_string();
                Some((name, ArgValue::Text(value), value_start + 1 + close + 1))
            }
            // Unterminated quote: the value is empty and scanning resumes at the quote.
            None => Some((name, ArgValue::Text(String::new()), value_start)),
        };
    }

    let len = rest
        .find(|c: char| c == '"' || c.is_whitespace())
        .unwrap_or(rest.len());
    Some((
        name,
        ArgValue::Text(rest[..len].to_string()),
        value_start + len,
    ))
}
