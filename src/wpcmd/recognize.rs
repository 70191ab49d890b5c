//! # Command Recognition
//!
//! Maps raw input to a catalog key using only the first two words. The remainder
//! is handed on untouched, so the same command text always routes the same way
//! regardless of its arguments.

use crate::catalog::{self, CommandKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recognized<'a> {
    pub key: CommandKey,
    /// Everything after `group action`, leading whitespace removed.
    pub rest: &'a str,
}

pub fn identify(raw: &str) -> Option<Recognized<'_>> {
    let input = raw.trim();

    if input.eq_ignore_ascii_case("help") || input.eq_ignore_ascii_case("/help") {
        return Some(Recognized {
            key: CommandKey::Help,
            rest: "",
        });
    }

    let (group, after_group) = next_word(input)?;
    let (action, rest) = next_word(after_group)?;

    let key = catalog::lookup(&group.to_lowercase(), &action.to_lowercase())?;
    Some(Recognized { key, rest })
}

/// Split off the first whitespace-delimited word. Returns `None` on empty input.
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], input[end..].trim_start())),
        None => Some((input, "")),
    }
}
