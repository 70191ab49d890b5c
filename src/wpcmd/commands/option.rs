use crate::args::ParsedArguments;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::store::data::values_match;
use crate::store::SiteBackend;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Number, Value};

pub fn get<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    if args.positional.len() > 1 {
        return Ok(CmdMessage::error(
            "`option get` received too many arguments. Usage: option get <option_name>",
        ));
    }
    let name = match args.positional(0).map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Ok(CmdMessage::error(
                "`option get` requires exactly one non-empty argument: option_name.",
            ))
        }
    };

    match site.get_option(name)? {
        Some(value) => Ok(CmdMessage::info(format_value(&value)?)),
        None => Ok(CmdMessage::notice(format!("Option '{}' not found.", name))),
    }
}

pub fn update<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let name = match args.positional(0).map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Ok(CmdMessage::error(
                "`option update` requires at least an option_name.",
            ))
        }
    };
    let Some(raw) = args.positional(1) else {
        return Ok(CmdMessage::error(
            "`option update` requires option_name and option_value. To set an empty string, provide it explicitly (e.g., option update my_option \"\").",
        ));
    };

    let value = infer_value(raw);
    if site.update_option(name, value.clone())? {
        tracing::info!(option = name, "option updated");
        return Ok(CmdMessage::success(format!("Option '{}' updated.", name)));
    }

    match site.get_option(name)? {
        Some(stored) if values_match(&stored, &value) => Ok(CmdMessage::notice(format!(
            "Option '{}' value unchanged. It was already set to the provided value.",
            name
        ))),
        _ => Ok(CmdMessage::error(format!(
            "Option '{}' not updated. An error may have occurred, or the option is protected.",
            name
        ))),
    }
}

/// Turn the raw text of `option update` into a typed value.
///
/// Attempts run in order and the first match wins: boolean and null literals
/// (case-insensitive), an exact integer, an exact float, JSON when the text opens
/// with `[` or `{`. Anything else is stored as the untrimmed string.
pub fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Some(literal) = parse_literal(trimmed) {
        return literal;
    }
    if let Some(int) = parse_exact_integer(trimmed) {
        return Value::from(int);
    }
    if let Some(float) = parse_exact_float(trimmed) {
        return Value::Number(float);
    }
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        if let Ok(decoded) = serde_json::from_str::<Value>(raw) {
            return decoded;
        }
    }
    Value::String(raw.to_string())
}

fn parse_literal(s: &str) -> Option<Value> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ => None,
    }
}

/// Only text that prints back identically counts, so `05` or `+5` stay strings.
fn parse_exact_integer(s: &str) -> Option<i64> {
    let n: i64 = s.parse().ok()?;
    (n.to_string() == s).then_some(n)
}

fn parse_exact_float(s: &str) -> Option<Number> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || ".-+eE".contains(c)) {
        return None;
    }
    let f: f64 = s.parse().ok()?;
    if !f.is_finite() || f.to_string() != s {
        return None;
    }
    Number::from_f64(f)
}

/// Render a stored option for display.
pub fn format_value(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Bool(b) => b.to_string(),
        Value::Null => "(null)".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => pretty_json(value)?,
    })
}

fn pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
