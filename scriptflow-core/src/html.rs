//! HTML report generation
//!
//! Generates a self-contained HTML report with embedded CSS and JavaScript.
//! One collapsible section per function, a search box filtering by function
//! name, and fan-in/fan-out badges from the intra-file call graph. Works
//! offline.

use crate::callgraph::CallGraph;
use crate::classify::escape_html;
use crate::report::ScriptReport;

/// Render analyzed scripts as an HTML report.
///
/// An empty report sequence is valid input and renders a "no functions
/// found" page rather than failing.
pub fn render_html(reports: &[ScriptReport], title: &str) -> String {
    let total_functions: usize = reports.iter().map(|r| r.functions.len()).sum();
    let total_calls: usize = reports
        .iter()
        .flat_map(|r| &r.functions)
        .map(|f| f.calls.len())
        .sum();

    let body = if total_functions == 0 {
        r#"<p class="empty">No functions found.</p>"#.to_string()
    } else {
        reports
            .iter()
            .filter(|r| !r.functions.is_empty())
            .map(render_script_section)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
            <div class="meta">{file_count} script(s) &middot; {total_functions} function(s) &middot; {total_calls} call edge(s)</div>
        </header>
        <input type="text" id="search" placeholder="Filter functions by name..." oninput="filterFunctions(this.value)">
        {body}
        <footer>Total functions found: {total_functions}</footer>
    </div>
    <script>{js}</script>
</body>
</html>"#,
        title = escape_html(title),
        css = inline_css(),
        js = inline_javascript(),
        file_count = reports.len(),
        total_functions = total_functions,
        total_calls = total_calls,
        body = body,
    )
}

/// Render one script file's section with its function blocks.
fn render_script_section(report: &ScriptReport) -> String {
    let graph = CallGraph::from_summaries(&report.functions);

    let functions = report
        .functions
        .iter()
        .map(|func| {
            let fan_in = graph.fan_in(&func.name);
            let fan_out = graph.fan_out(&func.name);
            let trace = func.trace.join("<br>");
            format!(
                r#"<div class="function-block" data-name="{name_lower}">
<button class="fn-toggle" onclick="toggle(this)">
    <span class="fn-name">{name}</span>
    <span class="fn-line">line {line}</span>
    <span class="badge">in {fan_in}</span>
    <span class="badge">out {fan_out}</span>
</button>
<div class="fn-body" style="display:none;">
{params}{vars}{conds}{loops}{trycatch}{calls}{comments}
<strong>Logic Trace:</strong>
<pre>{trace}</pre>
</div>
</div>"#,
                name_lower = escape_html(&func.name.to_ascii_lowercase()),
                name = escape_html(&func.name),
                line = func.start_line,
                fan_in = fan_in,
                fan_out = fan_out,
                params = render_list("Parameters", func.params.iter().map(|p| escape_html(p))),
                vars = render_list("Variables", func.vars.iter().cloned()),
                conds = render_list("Conditions", func.conditionals.iter().cloned()),
                loops = render_list("Loops", func.loops.iter().cloned()),
                trycatch = render_list(
                    "Try/Catch",
                    func.try_catch
                        .iter()
                        .map(|e| format!("{}: {}", e.kind.as_str(), e.line)),
                ),
                calls = render_list("Function Calls", func.calls.iter().map(|c| escape_html(c))),
                comments = render_list("Comments", func.comments.iter().cloned()),
                trace = trace,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<section class="section">
<h2>{file}</h2>
{functions}
</section>"#,
        file = escape_html(&report.file),
        functions = functions,
    )
}

/// Render one category list with its count. Items are pre-escaped.
fn render_list(title: &str, items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    let li = items
        .iter()
        .map(|item| format!("<li>{}</li>", item))
        .collect::<Vec<_>>()
        .join("");
    format!(
        "<strong>{} ({}):</strong><ul>{}</ul>\n",
        title,
        items.len(),
        li
    )
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #111827;
    background: #ffffff;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 2rem;
}

header {
    margin-bottom: 1.5rem;
    padding-bottom: 1rem;
    border-bottom: 2px solid #e5e7eb;
}

header h1 { font-size: 1.75rem; font-weight: 700; margin-bottom: 0.25rem; }
header .meta { color: #6b7280; font-size: 0.875rem; }

#search {
    width: 100%;
    padding: 0.6rem 0.8rem;
    margin-bottom: 1.5rem;
    border: 1px solid #d1d5db;
    border-radius: 0.5rem;
    font-size: 0.95rem;
}

.section { margin-bottom: 2rem; }
.section h2 {
    font-size: 1.1rem;
    font-weight: 700;
    margin-bottom: 0.75rem;
    color: #374151;
    font-family: monospace;
}

.function-block {
    margin-bottom: 0.75rem;
    border: 1px solid #e5e7eb;
    border-radius: 0.5rem;
    overflow: hidden;
}

.fn-toggle {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    width: 100%;
    padding: 0.6rem 1rem;
    background: #3b82f6;
    color: #ffffff;
    border: none;
    font-size: 0.95rem;
    text-align: left;
    cursor: pointer;
}

.fn-toggle:hover { background: #2563eb; }
.fn-name { font-weight: 600; font-family: monospace; }
.fn-line { color: #dbeafe; font-size: 0.8rem; }

.badge {
    margin-left: auto;
    background: rgba(255, 255, 255, 0.2);
    border-radius: 999px;
    padding: 0.05rem 0.6rem;
    font-size: 0.75rem;
}
.badge + .badge { margin-left: 0.25rem; }

.fn-body { padding: 1rem; }
.fn-body strong { font-size: 0.85rem; color: #374151; }
.fn-body ul { margin: 0.25rem 0 0.75rem 1.25rem; font-family: monospace; font-size: 0.85rem; }

pre {
    background: #f9fafb;
    border: 1px solid #e5e7eb;
    border-radius: 0.5rem;
    padding: 0.75rem;
    font-family: monospace;
    font-size: 0.85rem;
    overflow-x: auto;
    margin-top: 0.25rem;
}

footer {
    margin-top: 2rem;
    padding-top: 1rem;
    border-top: 1px solid #e5e7eb;
    color: #6b7280;
    font-size: 0.875rem;
}

.empty { color: #6b7280; font-style: italic; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
function toggle(button) {
    var body = button.nextElementSibling;
    body.style.display = (body.style.display === 'none') ? 'block' : 'none';
}

function filterFunctions(query) {
    var q = query.toLowerCase();
    document.querySelectorAll('.function-block').forEach(function (block) {
        var name = block.getAttribute('data-name') || '';
        block.style.display = name.indexOf(q) === -1 ? 'none' : '';
    });
}
"#
}
