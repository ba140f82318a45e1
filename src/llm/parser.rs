//! Response cleanup for LLM outputs.
//!
//! Models are told not to use markdown, but frequently wrap the statement in a
//! fenced code block anyway. [`clean_sql_response`] reduces such a response to
//! the bare statement.

use regex::Regex;
use std::sync::OnceLock;

/// Language tags recognised directly after an opening fence, longest first so
/// that `sqlite` is not read as `sql` + `ite`.
const FENCE_TAGS: &str = "sqlite3|sqlite|postgresql|postgres|mysql|sql";

/// Non-SQL tags models put on a fence line of their own.
const PLAIN_TAGS: &str = "plaintext|text|txt";

/// Matches the first complete fenced block and captures its body.
fn code_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?is)```[ \t]*(?:(?:{FENCE_TAGS}|{PLAIN_TAGS})?[ \t]*\r?\n|(?:{FENCE_TAGS})\b)?(.*?)```"
        );
        Regex::new(&pattern).expect("code block pattern is valid")
    })
}

/// Matches a lone fence marker and any language tag glued to it.
fn fence_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?i)```[ \t]*(?:{FENCE_TAGS})?");
        Regex::new(&pattern).expect("fence marker pattern is valid")
    })
}

/// Matches the `SQL:` label used by the prompt's worked examples.
fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^sql\s*:\s*").expect("label pattern is valid"))
}

/// Strips markdown fencing from a model response.
///
/// - If the response contains a complete fenced block, its body is used and any
///   prose around it is dropped.
/// - Otherwise every stray fence marker (with its language tag) is removed.
/// - A single-backtick wrap and a leading `SQL:` label are removed.
///
/// The result is trimmed and never contains a triple-backtick fence. An empty
/// string means the response held no statement.
pub fn clean_sql_response(raw: &str) -> String {
    let trimmed = raw.trim();

    let body = match code_block_regex().captures(trimmed) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
        None => trimmed.to_string(),
    };

    // Nested or unbalanced fences leave markers behind.
    let body = fence_marker_regex().replace_all(&body, "");
    let mut sql = body.trim();

    if sql.len() >= 2 && sql.starts_with('`') && sql.ends_with('`') {
        sql = sql.trim_matches('`').trim();
    }

    label_regex().replace(sql, "").trim().to_string()
}
