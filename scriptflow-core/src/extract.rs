//! Function boundary extraction
//!
//! Delimits brace-balanced function blocks in a raw line sequence and
//! collects the global known-name set used later for call detection.
//!
//! Global invariants enforced:
//! - Blocks are emitted in source order; `start_line` is strictly increasing
//! - The name pre-pass completes before any block is classified
//!
//! This is a lexical scanner, not a parser. It does not validate nesting and
//! will happily pick up a `function` keyword inside a string or comment
//! (accepted limitation). Malformed input produces partial blocks, never
//! errors.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a function introducer: the keyword at statement start followed by
/// the identifier (everything up to whitespace, `(` or `{`).
static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*function\s+([^\s({]+)").unwrap());

/// A brace-delimited function definition region.
///
/// `lines` holds the raw source lines, introducer first, closing line last
/// (or simply the tail of the file when the block never closes).
#[derive(Debug, Clone)]
pub struct FunctionBlock {
    pub name: String,
    /// 1-based line number of the introducer line.
    pub start_line: u32,
    pub lines: Vec<String>,
}

/// Result of scanning one file: the delimited blocks plus the known-name set.
///
/// `names` is collected by a purely lexical pre-pass over every line, so it
/// includes functions defined later in the file and functions nested inside
/// other functions. Duplicates are kept in source order.
#[derive(Debug, Default)]
pub struct Extraction {
    pub blocks: Vec<FunctionBlock>,
    pub names: Vec<String>,
}

/// Extract the function name from a line, if it is an introducer.
pub fn introducer_name(line: &str) -> Option<&str> {
    FUNCTION_RE
        .captures(line)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Net brace count of a line: `{` minus `}`.
fn net_braces(line: &str) -> i32 {
    let opens = line.matches('{').count() as i32;
    let closes = line.matches('}').count() as i32;
    opens - closes
}

/// Scan a file's lines and delimit its function blocks.
///
/// Two passes:
/// 1. Name pre-pass: every introducer match contributes its identifier,
///    regardless of brace context. Required because a function may call a
///    function defined later in the file.
/// 2. Block pass: outside a block, an introducer starts one with the depth
///    set to the introducer line's net brace count. Inside a block, every
///    line is stored and counted; the block closes when depth returns to
///    zero or below. Depth is only tested on lines after the introducer.
///
/// A block still open at end of input is emitted as-is. Nested `function`
/// keywords inside an open block do not start new blocks; they stay ordinary
/// lines of the enclosing one.
pub fn collect_functions(lines: &[String]) -> Extraction {
    let mut names = Vec::new();
    for line in lines {
        if let Some(name) = introducer_name(line) {
            names.push(name.to_string());
        }
    }

    let mut blocks = Vec::new();
    let mut inside_function = false;
    let mut brace_depth: i32 = 0;
    let mut current_name = String::new();
    let mut current_start: u32 = 0;
    let mut current_lines: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !inside_function {
            if let Some(name) = introducer_name(line) {
                inside_function = true;
                brace_depth = net_braces(line);
                current_name = name.to_string();
                current_start = (i + 1) as u32;
                current_lines = vec![line.clone()];
            }
            continue;
        }

        brace_depth += net_braces(line);
        current_lines.push(line.clone());
        if brace_depth <= 0 {
            blocks.push(FunctionBlock {
                name: std::mem::take(&mut current_name),
                start_line: current_start,
                lines: std::mem::take(&mut current_lines),
            });
            inside_function = false;
        }
    }

    // Implicit close at end of input for an unbalanced block.
    if inside_function {
        blocks.push(FunctionBlock {
            name: current_name,
            start_line: current_start,
            lines: current_lines,
        });
    }

    Extraction { blocks, names }
}

#[cfg(test)]
#[path = "extract/tests.rs"]
mod tests;
