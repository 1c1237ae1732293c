//! Contract compliance tests for parser
//!
//! Verifies the behaviors the C boundary and its clients rely on.

use parser::{compile, parse, Arena, CompileOptions, NameInterner};

/// Parse results must record the generation of the arena that owns their
/// nodes so stale handle pairings can be detected.
#[test]
fn test_contract_result_binds_to_arena_generation() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let result = parse("local x = 1", &mut interner, &mut arena);
    assert_eq!(result.arena_generation, arena.generation());
    assert_eq!(interner.arena_generation(), arena.generation());
}

/// Every arena gets a process-unique generation.
#[test]
fn test_contract_arena_generations_are_unique() {
    let a = Arena::new();
    let b = Arena::new();
    assert_ne!(a.generation(), b.generation());
}

/// The first diagnostic is the one clients surface; it must be the earliest
/// error in the source.
#[test]
fn test_contract_first_diagnostic_is_earliest() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let result = parse("local x = 1\nlocal y = )", &mut interner, &mut arena);
    assert!(!result.diagnostics.is_empty());
    let first = &result.diagnostics[0];
    assert!(result
        .diagnostics
        .iter()
        .all(|d| first.span.begin <= d.span.begin));
    assert_eq!(first.span.begin.line, 1);
    assert_eq!(first.message, "Expected expression, got ')'");
}

/// Diagnostic messages spell out the offending token in quotes, with
/// `<eof>` for end of input.
#[test]
fn test_contract_diagnostic_spelling() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let result = parse("local", &mut interner, &mut arena);
    assert!(!result.diagnostics.is_empty());
    assert!(result.diagnostics[0].message.ends_with("got <eof>"));
}

/// Compile options default to optimized output with debug positions.
#[test]
fn test_contract_compile_option_defaults() {
    let options = CompileOptions::default();
    assert_eq!(options.optimization_level, 1);
    assert_eq!(options.debug_level, 1);
    assert_eq!(options.coverage_level, 0);
}

/// A clean parse compiles; the emitted module always has a main chunk.
#[test]
fn test_contract_clean_parse_compiles() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let result = parse("return 1 + 2", &mut interner, &mut arena);
    assert!(result.diagnostics.is_empty());
    let module = compile(&arena, &interner, &result, &CompileOptions::default()).unwrap();
    assert!((module.main as usize) < module.chunks.len());
}
