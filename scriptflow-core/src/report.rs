//! Report types and text/JSON rendering
//!
//! Global invariants enforced:
//! - Summaries stay in source order (strictly increasing `start_line`)
//! - Byte-for-byte identical output across runs

use serde::{Deserialize, Serialize};

/// Whether a try/catch entry opened a `try` or a `catch` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TryCatchKind {
    Try,
    Catch,
}

impl TryCatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TryCatchKind::Try => "TRY",
            TryCatchKind::Catch => "CATCH",
        }
    }
}

/// One line of a function body that matched a try/catch keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryCatchEntry {
    pub kind: TryCatchKind,
    pub line: String,
}

/// Structural summary of one function block.
///
/// All stored line text is HTML-escaped. Category lists are in source order
/// and a line may appear in several of them; `trace` covers every non-empty
/// line of the block. `calls` is an insertion-ordered set of other known
/// function names (never the function's own name).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FunctionSummary {
    pub name: String,
    pub start_line: u32,
    pub params: Vec<String>,
    pub vars: Vec<String>,
    pub conditionals: Vec<String>,
    pub loops: Vec<String>,
    pub try_catch: Vec<TryCatchEntry>,
    pub comments: Vec<String>,
    pub calls: Vec<String>,
    pub trace: Vec<String>,
}

/// Analysis result for a single script file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptReport {
    pub file: String,
    pub functions: Vec<FunctionSummary>,
}

impl ScriptReport {
    pub fn total_functions(&self) -> usize {
        self.functions.len()
    }
}

/// Render reports as a fixed-width text table plus per-file totals.
pub fn render_text(reports: &[ScriptReport]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<30} {:<6} {:<30} {:>6} {:>6} {:>6} {:>6}\n",
        "FILE", "LINE", "FUNCTION", "PARAMS", "VARS", "CALLS", "TRACE"
    ));

    let mut total = 0usize;
    for report in reports {
        for func in &report.functions {
            output.push_str(&format!(
                "{:<30} {:<6} {:<30} {:>6} {:>6} {:>6} {:>6}\n",
                truncate_or_pad(&report.file, 30),
                func.start_line,
                truncate_or_pad(&func.name, 30),
                func.params.len(),
                func.vars.len(),
                func.calls.len(),
                func.trace.len(),
            ));
        }
        total += report.total_functions();
    }

    output.push_str(&format!("\nTotal functions found: {}\n", total));
    output
}

/// Render reports as pretty-printed JSON.
pub fn render_json(reports: &[ScriptReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width
///
/// Truncation backs up to a char boundary so multibyte paths cannot split a
/// code point.
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        let mut end = width.saturating_sub(3);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ScriptReport> {
        vec![ScriptReport {
            file: "deploy.ps1".to_string(),
            functions: vec![FunctionSummary {
                name: "Invoke-Deploy".to_string(),
                start_line: 3,
                vars: vec!["$target = &quot;prod&quot;".to_string()],
                trace: vec![
                    "function Invoke-Deploy {".to_string(),
                    "$target = &quot;prod&quot;".to_string(),
                    "}".to_string(),
                ],
                ..Default::default()
            }],
        }]
    }

    #[test]
    fn text_output_lists_each_function_and_total() {
        let text = render_text(&sample());
        assert!(text.contains("Invoke-Deploy"));
        assert!(text.contains("deploy.ps1"));
        assert!(text.contains("Total functions found: 1"));
    }

    #[test]
    fn text_output_handles_empty_input() {
        let text = render_text(&[]);
        assert!(text.contains("Total functions found: 0"));
    }

    #[test]
    fn text_output_truncates_multibyte_paths_on_char_boundaries() {
        // 32 bytes, with a two-byte character straddling the truncation
        // offset (byte 27 of a 30-wide column).
        let mut reports = sample();
        reports[0].file = format!("{}\u{e9}xxxx", "a".repeat(26));
        let text = render_text(&reports);
        assert!(text.contains(&format!("{}...", "a".repeat(26))));
    }

    #[test]
    fn json_round_trips() {
        let json = render_json(&sample());
        let parsed: Vec<ScriptReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].functions[0].name, "Invoke-Deploy");
        assert_eq!(parsed[0].functions[0].start_line, 3);
    }

    #[test]
    fn try_catch_kind_serializes_uppercase() {
        let entry = TryCatchEntry {
            kind: TryCatchKind::Catch,
            line: "catch {".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"CATCH\""));
        assert_eq!(TryCatchKind::Try.as_str(), "TRY");
    }
}
