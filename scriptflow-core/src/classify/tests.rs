//! Tests for statement classification

use crate::classify::{classify_block, escape_html};
use crate::extract::{collect_functions, FunctionBlock};
use crate::report::TryCatchKind;

fn lines(src: &str) -> Vec<String> {
    src.lines().map(str::to_string).collect()
}

/// Extract and classify a single-function source, with the full known-name
/// set from the pre-pass.
fn classify_first(src: &str) -> crate::report::FunctionSummary {
    let extraction = collect_functions(&lines(src));
    classify_block(&extraction.blocks[0], &extraction.names)
}

fn block(name: &str, src: &str) -> FunctionBlock {
    FunctionBlock {
        name: name.to_string(),
        start_line: 1,
        lines: lines(src),
    }
}

#[test]
fn single_assignment_function() {
    let summary = classify_first(
        "\
function Foo {
$x = 1
}",
    );
    assert_eq!(summary.name, "Foo");
    assert_eq!(summary.vars, vec!["$x = 1"]);
    assert!(summary.calls.is_empty());
    assert_eq!(summary.trace, vec!["function Foo {", "$x = 1", "}"]);
}

#[test]
fn trace_covers_every_non_empty_line() {
    let summary = classify_first(
        "\
function Foo {

    $x = 1

    # done
}",
    );
    assert_eq!(
        summary.trace,
        vec!["function Foo {", "$x = 1", "# done", "}"]
    );
}

#[test]
fn comments_are_recorded() {
    let summary = classify_first(
        "\
function Foo {
    # set things up
    $x = 1
}",
    );
    assert_eq!(summary.comments, vec!["# set things up"]);
}

#[test]
fn conditionals_and_loops() {
    let summary = classify_first(
        "\
function Foo {
    if ($x) {
    } elseif ($y) {
    } else {
    }
    foreach ($i in $items) {
    }
    while ($go) {
    }
}",
    );
    // `} elseif ($y) {` matches only the elseif rule, `} else {` only else.
    assert_eq!(summary.conditionals.len(), 3);
    assert_eq!(summary.loops.len(), 2);
}

#[test]
fn line_with_if_and_else_is_recorded_twice() {
    let summary = classify_first(
        "\
function Foo {
    if ($x) { $a = 1 } else { $b = 2 }
}",
    );
    assert_eq!(summary.conditionals.len(), 2);
}

#[test]
fn try_catch_entries_are_tagged() {
    let summary = classify_first(
        "\
function Foo {
    try {
        $x = 1
    }
    catch {
        $err = $_
    }
}",
    );
    assert_eq!(summary.try_catch.len(), 2);
    assert_eq!(summary.try_catch[0].kind, TryCatchKind::Try);
    assert_eq!(summary.try_catch[0].line, "try {");
    assert_eq!(summary.try_catch[1].kind, TryCatchKind::Catch);
}

#[test]
fn param_block_contributes_dollar_tokens() {
    let summary = classify_first(
        "\
function Foo {
    param($Name, $Count)
    $x = $Name
}",
    );
    assert_eq!(summary.params, vec!["$Name", "$Count"]);
}

#[test]
fn inline_params_are_comma_split_and_trimmed() {
    let summary = classify_first(
        "\
function Foo( $a , $b ) {
}",
    );
    assert_eq!(summary.params, vec!["$a", "$b"]);
}

#[test]
fn empty_inline_param_list_yields_no_params() {
    let summary = classify_first(
        "\
function Foo() {
}",
    );
    assert!(summary.params.is_empty());
}

#[test]
fn empty_entries_in_inline_param_list_are_kept() {
    let summary = classify_first(
        "\
function Foo($a,,$b) {
}",
    );
    assert_eq!(summary.params, vec!["$a", "", "$b"]);
}

#[test]
fn calls_to_known_functions_are_detected() {
    let known = vec!["Foo".to_string(), "Write-Log".to_string()];
    let summary = classify_block(
        &block(
            "Foo",
            "\
function Foo {
    Write-Log 'hello'
    Write-Log 'again'
}",
        ),
        &known,
    );
    // First occurrence wins; duplicates are not repeated.
    assert_eq!(summary.calls, vec!["Write-Log"]);
}

#[test]
fn self_calls_are_not_edges() {
    let known = vec!["Recurse".to_string()];
    let summary = classify_block(
        &block(
            "Recurse",
            "\
function Recurse {
    Recurse
}",
        ),
        &known,
    );
    assert!(summary.calls.is_empty());
}

#[test]
fn unknown_tokens_never_become_calls() {
    let known = vec!["Foo".to_string()];
    let summary = classify_block(
        &block(
            "Foo",
            "\
function Foo {
    Get-ChildItem -Path C:
}",
        ),
        &known,
    );
    assert!(summary.calls.is_empty());
}

#[test]
fn conditional_line_with_call_lands_in_both() {
    let known = vec!["Foo".to_string(), "Test-Ready".to_string()];
    let summary = classify_block(
        &block(
            "Foo",
            "\
function Foo {
    if (Test-Ready) {
    }
}",
        ),
        &known,
    );
    assert_eq!(summary.conditionals, vec!["if (Test-Ready) {"]);
    assert_eq!(summary.calls, vec!["Test-Ready"]);
}

#[test]
fn call_order_follows_first_appearance() {
    let known = vec![
        "Main".to_string(),
        "Alpha".to_string(),
        "Beta".to_string(),
    ];
    let summary = classify_block(
        &block(
            "Main",
            "\
function Main {
    Beta
    Alpha
    Beta
}",
        ),
        &known,
    );
    assert_eq!(summary.calls, vec!["Beta", "Alpha"]);
}

#[test]
fn stored_text_is_html_escaped() {
    let summary = classify_first(
        "\
function Foo {
    $x = $a -lt 5 <# a & b #>
}",
    );
    assert_eq!(summary.vars, vec!["$x = $a -lt 5 &lt;# a &amp; b #&gt;"]);
    assert_eq!(summary.trace[1], "$x = $a -lt 5 &lt;# a &amp; b #&gt;");
}

#[test]
fn escape_html_handles_each_entity_once() {
    assert_eq!(escape_html("a & b"), "a &amp; b");
    assert_eq!(escape_html("<x>"), "&lt;x&gt;");
    assert_eq!(escape_html("&amp;"), "&amp;amp;");
}

#[test]
fn keyword_matching_is_case_insensitive() {
    let summary = classify_first(
        "\
function Foo {
    IF ($x) {
    }
    TRY {
    }
    CATCH {
    }
}",
    );
    assert_eq!(summary.conditionals.len(), 1);
    assert_eq!(summary.try_catch.len(), 2);
}

#[test]
fn no_category_match_is_not_an_error() {
    let summary = classify_first(
        "\
function Foo {
    Write-Host 'plain statement'
}",
    );
    assert!(summary.vars.is_empty());
    assert!(summary.conditionals.is_empty());
    assert_eq!(summary.trace.len(), 3);
}
