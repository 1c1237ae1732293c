//! Unit tests for the parser public API

use parser::{parse, query, Arena, AstNode, NameInterner};

fn parse_source(source: &str) -> (Arena, NameInterner, parser::ParseResult) {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let result = parse(source, &mut interner, &mut arena);
    (arena, interner, result)
}

#[test]
fn test_clean_parse_has_no_diagnostics() {
    let (arena, _, result) = parse_source("local x = 1\nprint(x + 2)");
    assert!(result.diagnostics.is_empty());
    assert!(matches!(arena.get(result.root), AstNode::Block { .. }));
    assert_eq!(result.arena_generation, arena.generation());
}

#[test]
fn test_error_recovery_continues_past_bad_statement() {
    let (_, _, result) = parse_source("local x = 1\nlocal y = )\nlocal z = 3");
    assert!(!result.diagnostics.is_empty());
    let first = &result.diagnostics[0];
    assert_eq!(first.span.begin.line, 1);
    assert_eq!(first.message, "Expected expression, got ')'");
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let (_, _, result) = parse_source("local = 1\nlocal = 2");
    assert!(result.diagnostics.len() >= 2);
    for pair in result.diagnostics.windows(2) {
        assert!(pair[0].span.begin <= pair[1].span.begin);
    }
}

#[test]
fn test_hot_comments_carried_on_result() {
    let (_, _, result) = parse_source("--!strict\nlocal x = 1");
    assert_eq!(result.hot_comments.len(), 1);
    assert!(result.hot_comments[0].header);
    assert_eq!(result.hot_comments[0].text.trim(), "strict");
}

#[test]
fn test_native_attribute_is_detected() {
    let (arena, _, result) = parse_source("@native function fast() end");
    assert!(result.diagnostics.is_empty());
    assert!(query::has_native_function(&arena, &result));

    let (arena, _, result) = parse_source("function slow() end");
    assert!(!query::has_native_function(&arena, &result));
}

#[test]
fn test_collect_functions_lists_inner_before_outer() {
    let (arena, _, result) = parse_source(
        "function outer()\n  local function inner() end\nend\nfunction late() end",
    );
    assert!(result.diagnostics.is_empty());
    let functions = query::collect_functions(&arena, &result);
    let names: Vec<&str> = functions
        .iter()
        .map(|&node| match arena.get(node) {
            AstNode::FunctionLiteral {
                name: Some(name), ..
            } => arena.name(*name),
            _ => panic!("expected a named function literal"),
        })
        .collect();
    assert_eq!(names, ["inner", "outer", "late"]);
}

#[test]
fn test_unknown_attribute_reports_and_recovers() {
    let (_, _, result) = parse_source("@checked function f() end");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("checked"));
}

#[test]
fn test_interned_names_deduplicate() {
    let (_, interner, result) = parse_source("local x = 1\nlocal y = x + x");
    assert!(result.diagnostics.is_empty());
    assert_eq!(interner.len(), 2);
}

#[test]
fn test_deep_expression_nesting_is_diagnosed() {
    let source = format!("local x = {}1{}", "(".repeat(2000), ")".repeat(2000));
    let (_, _, result) = parse_source(&source);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("recursion depth")));
}

#[test]
fn test_deep_statement_nesting_is_diagnosed() {
    let source = format!("{}{}", "do ".repeat(2000), "end ".repeat(2000));
    let (_, _, result) = parse_source(&source);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("recursion depth")));
}

#[test]
fn test_deep_elseif_chain_is_diagnosed() {
    let mut source = String::from("if x then y = 1\n");
    for _ in 0..2000 {
        source.push_str("elseif x then y = 1\n");
    }
    source.push_str("end\n");
    let (_, _, result) = parse_source(&source);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("recursion depth")));
}
