//! Tests for function boundary extraction

use crate::extract::{collect_functions, introducer_name};

fn lines(src: &str) -> Vec<String> {
    src.lines().map(str::to_string).collect()
}

#[test]
fn detects_simple_function() {
    let src = "\
function Foo {
    $x = 1
}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.names, vec!["Foo"]);
    assert_eq!(extraction.blocks.len(), 1);

    let block = &extraction.blocks[0];
    assert_eq!(block.name, "Foo");
    assert_eq!(block.start_line, 1);
    assert_eq!(block.lines, vec!["function Foo {", "    $x = 1", "}"]);
}

#[test]
fn keyword_match_is_case_insensitive() {
    let src = "\
FUNCTION Get-Data {
}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks[0].name, "Get-Data");
}

#[test]
fn introducer_name_stops_at_paren_or_brace() {
    assert_eq!(introducer_name("function Foo($a) {"), Some("Foo"));
    assert_eq!(introducer_name("function Bar{"), Some("Bar"));
    assert_eq!(introducer_name("  function Baz "), Some("Baz"));
    assert_eq!(introducer_name("$x = 1"), None);
}

#[test]
fn pre_pass_collects_names_from_entire_file() {
    // B is nested inside A, C comes after. All three names are known
    // regardless of brace context.
    let src = "\
function A {
    function B {
    }
}
function C {
}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.names, vec!["A", "B", "C"]);
}

#[test]
fn nested_function_does_not_split_the_enclosing_block() {
    let src = "\
function Outer {
    function Inner {
        $y = 2
    }
    $x = 1
}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks.len(), 1);
    let block = &extraction.blocks[0];
    assert_eq!(block.name, "Outer");
    assert_eq!(block.lines.len(), 6);
    assert!(block.lines.iter().any(|l| l.contains("Inner")));
}

#[test]
fn nested_braces_stay_inside_one_block() {
    let src = "\
function Foo {
    if ($x) {
        $y = @{ a = 1 }
    }
}
function Bar {
}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks.len(), 2);
    assert_eq!(extraction.blocks[0].lines.len(), 5);
    assert_eq!(extraction.blocks[1].start_line, 6);
}

#[test]
fn unclosed_block_is_emitted_at_end_of_input() {
    let src = "\
function Broken {
    if ($x) {
        $y = 1";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks.len(), 1);
    let block = &extraction.blocks[0];
    assert_eq!(block.name, "Broken");
    // The trace reaches the last line of input.
    assert_eq!(block.lines.last().unwrap().trim(), "$y = 1");
}

#[test]
fn blank_lines_are_stored_and_counted() {
    let src = "\
function Foo {

    $x = 1

}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks[0].lines.len(), 5);
}

#[test]
fn brace_on_line_after_introducer() {
    let src = "\
function Foo
{
    $x = 1
}";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks.len(), 1);
    assert_eq!(extraction.blocks[0].lines.len(), 4);
}

#[test]
fn start_lines_are_strictly_increasing() {
    let src = "\
function A {
}
function B {
}
function C {
}";
    let extraction = collect_functions(&lines(src));
    let starts: Vec<u32> = extraction.blocks.iter().map(|b| b.start_line).collect();
    assert_eq!(starts, vec![1, 3, 5]);
}

#[test]
fn empty_input_yields_nothing() {
    let extraction = collect_functions(&[]);
    assert!(extraction.blocks.is_empty());
    assert!(extraction.names.is_empty());
}

#[test]
fn text_outside_functions_is_ignored() {
    let src = "\
$global = 1
Write-Host 'top level'
function Foo {
}
Write-Host 'after'";
    let extraction = collect_functions(&lines(src));
    assert_eq!(extraction.blocks.len(), 1);
    assert_eq!(extraction.blocks[0].start_line, 3);
}
