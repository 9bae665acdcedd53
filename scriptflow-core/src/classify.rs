//! Statement classification
//!
//! Turns one delimited function block plus the global known-name set into a
//! [`FunctionSummary`]: an ordered trace of every non-empty line and, per
//! line, zero or more category matches. Classification is best-effort and
//! never fails; a line that matches nothing still lands in the trace.
//!
//! Category matching is an ordered rule table of (pattern, category) pairs
//! evaluated independently per line, so a single line may be recorded in
//! several category lists (e.g. a conditional that also contains a call
//! token).

use crate::extract::FunctionBlock;
use crate::report::{FunctionSummary, TryCatchEntry, TryCatchKind};
use regex::Regex;
use std::sync::LazyLock;

/// Category a classification rule records its line under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Comment,
    Conditional,
    Loop,
    Try,
    Catch,
    VariableAssignment,
}

/// Ordered rule table. Keyword matches are case-insensitive; the three
/// conditional keywords are separate rules, so a line carrying both `if`
/// and `else` is recorded twice under conditionals.
static RULES: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"^\s*#").unwrap(), Category::Comment),
        (Regex::new(r"(?i)\bif\b").unwrap(), Category::Conditional),
        (Regex::new(r"(?i)\belseif\b").unwrap(), Category::Conditional),
        (Regex::new(r"(?i)\belse\b").unwrap(), Category::Conditional),
        (
            Regex::new(r"(?i)\b(?:for|foreach|while)\b").unwrap(),
            Category::Loop,
        ),
        (Regex::new(r"(?i)\btry\b").unwrap(), Category::Try),
        (Regex::new(r"(?i)\bcatch\b").unwrap(), Category::Catch),
        (
            Regex::new(r"^\s*\$\w+\s*=").unwrap(),
            Category::VariableAssignment,
        ),
    ]
});

/// A `param(...)` block line inside a function body.
static PARAM_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*param\s*\(").unwrap());

/// `$name` tokens, used to pull parameters out of a `param(...)` line.
static DOLLAR_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\w+").unwrap());

/// Inline parameter list on the introducer line: `function Name(a, b)`.
static INLINE_PARAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*function\s+[^\s({]+\s*\((.*?)\)").unwrap());

/// Word-like tokens checked against the known-name set for call detection.
/// Requires at least two characters, hyphens allowed (PowerShell verbs like
/// `Get-Config`).
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_-]+\b").unwrap());

/// Standard HTML entity escaping of `&`, `<` and `>` (ampersand first).
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Classify one function block against the global known-name set.
///
/// `known_names` includes the block's own name; self-references are filtered
/// out of `calls` after token matching. Every non-empty trimmed line is
/// escaped and appended to the trace before any category test runs.
pub fn classify_block(block: &FunctionBlock, known_names: &[String]) -> FunctionSummary {
    let mut summary = FunctionSummary {
        name: block.name.clone(),
        start_line: block.start_line,
        ..Default::default()
    };

    // Inline parameter list on the introducer line, recorded before the body
    // scan. A fully empty list yields no parameters, but empty entries
    // between commas are kept as empty strings.
    if let Some(first) = block.lines.first() {
        if let Some(caps) = INLINE_PARAMS_RE.captures(first) {
            let inner = caps.get(1).unwrap().as_str();
            if !inner.is_empty() {
                summary
                    .params
                    .extend(inner.split(',').map(|p| p.trim().to_string()));
            }
        }
    }

    for line in &block.lines {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        let escaped = escape_html(stripped);
        summary.trace.push(escaped.clone());

        if PARAM_BLOCK_RE.is_match(stripped) {
            for m in DOLLAR_VAR_RE.find_iter(stripped) {
                summary.params.push(m.as_str().to_string());
            }
        }

        for (pattern, category) in RULES.iter() {
            if !pattern.is_match(stripped) {
                continue;
            }
            match category {
                Category::Comment => summary.comments.push(escaped.clone()),
                Category::Conditional => summary.conditionals.push(escaped.clone()),
                Category::Loop => summary.loops.push(escaped.clone()),
                Category::Try => summary.try_catch.push(TryCatchEntry {
                    kind: TryCatchKind::Try,
                    line: escaped.clone(),
                }),
                Category::Catch => summary.try_catch.push(TryCatchEntry {
                    kind: TryCatchKind::Catch,
                    line: escaped.clone(),
                }),
                Category::VariableAssignment => summary.vars.push(escaped.clone()),
            }
        }

        // Call detection: first occurrence wins, self-calls are not edges.
        for token in TOKEN_RE.find_iter(stripped) {
            let token = token.as_str();
            if token == block.name {
                continue;
            }
            if known_names.iter().any(|n| n == token)
                && !summary.calls.iter().any(|c| c == token)
            {
                summary.calls.push(token.to_string());
            }
        }
    }

    summary
}

#[cfg(test)]
#[path = "classify/tests.rs"]
mod tests;
