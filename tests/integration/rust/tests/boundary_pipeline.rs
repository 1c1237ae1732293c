//! End-to-end tests through the C boundary
//!
//! Drives the exported entry points the way a foreign embedder would:
//! create handles, parse, marshal results, compile, and free everything.

use bytecode_system::serialize;
use lumen_capi::{
    lumen_arena_free, lumen_arena_new, lumen_buffer_free, lumen_compile, lumen_compile_free,
    lumen_interner_free, lumen_interner_new, lumen_lexeme_to_string, lumen_lexer_free,
    lumen_lexer_new, lumen_lexer_next, lumen_parse, lumen_parseresult_free,
    lumen_parseresult_free_errors, lumen_parseresult_free_hotcomments,
    lumen_parseresult_get_errors, lumen_parseresult_get_hotcomments,
    lumen_parseresult_has_native_function, CompileOptions,
};

#[test]
fn test_embedder_happy_path() {
    let source = "--!strict\nlocal x = 1\nreturn x + 1";
    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);
        let result = lumen_parse(source.as_ptr(), source.len(), interner, arena);

        let errors = lumen_parseresult_get_errors(result);
        assert_eq!(errors.count, 0);
        lumen_parseresult_free_errors(errors);

        let comments = lumen_parseresult_get_hotcomments(result);
        assert_eq!(comments.count, 1);
        let records = std::slice::from_raw_parts(comments.records, comments.count);
        assert!(records[0].header);
        lumen_parseresult_free_hotcomments(comments);

        let compiled = lumen_compile(result, interner, std::ptr::null());
        assert!(compiled.ok);
        let bytes = std::slice::from_raw_parts(compiled.data, compiled.len);
        assert_eq!(bytes[0], serialize::FORMAT_VERSION);
        lumen_compile_free(compiled);

        lumen_parseresult_free(result);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }
}

#[test]
fn test_embedder_error_path() {
    // A syntax error on the second line surfaces as a ":2: " error payload.
    let source = "local x = 1\nlocal y = )";
    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);
        let result = lumen_parse(source.as_ptr(), source.len(), interner, arena);

        let errors = lumen_parseresult_get_errors(result);
        assert!(errors.count >= 1);
        let records = std::slice::from_raw_parts(errors.records, errors.count);
        assert_eq!(records[0].span.begin.line, 1);
        lumen_parseresult_free_errors(errors);

        let compiled = lumen_compile(result, interner, std::ptr::null());
        assert!(!compiled.ok);
        let bytes = std::slice::from_raw_parts(compiled.data, compiled.len);
        assert!(serialize::is_error_payload(bytes));
        let message = String::from_utf8_lossy(&bytes[1..]);
        assert!(message.starts_with(":2: "), "got {:?}", message);
        assert!(message.contains("Expected expression, got ')'"));
        lumen_compile_free(compiled);

        lumen_parseresult_free(result);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }
}

#[test]
fn test_tree_survives_parse_result_destruction() {
    // The handle may be freed before queries are done running against a
    // second result parsed into the same arena.
    let first = "local a = 1";
    let second = "@native function fast() end";
    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);

        let result_a = lumen_parse(first.as_ptr(), first.len(), interner, arena);
        lumen_parseresult_free(result_a);

        let result_b = lumen_parse(second.as_ptr(), second.len(), interner, arena);
        assert!(lumen_parseresult_has_native_function(result_b));

        lumen_parseresult_free(result_b);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }
}

#[test]
fn test_compile_options_cross_the_boundary() {
    let source = "local x = 1\nreturn x";
    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);
        let result = lumen_parse(source.as_ptr(), source.len(), interner, arena);

        let options = CompileOptions {
            optimization_level: 0,
            debug_level: 0,
            coverage_level: 0,
        };
        let stripped = lumen_compile(result, interner, &options);
        assert!(stripped.ok);
        let stripped_len = stripped.len;
        lumen_compile_free(stripped);

        let debug = lumen_compile(result, interner, std::ptr::null());
        assert!(debug.ok);
        // Debug positions make the payload strictly larger.
        assert!(debug.len > stripped_len);
        lumen_compile_free(debug);

        lumen_parseresult_free(result);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }
}

#[test]
fn test_cursor_matches_parser_spelling() {
    let source = "local x = )";
    unsafe {
        let cursor = lumen_lexer_new(source.as_ptr(), source.len());
        let mut renderings = Vec::new();
        for _ in 0..5 {
            let lexeme = lumen_lexer_next(cursor);
            let buffer = lumen_lexeme_to_string(lexeme);
            renderings.push(
                String::from_utf8_lossy(std::slice::from_raw_parts(buffer.data, buffer.len))
                    .into_owned(),
            );
            lumen_buffer_free(buffer);
        }
        lumen_lexer_free(cursor);
        assert_eq!(renderings, ["'local'", "'x'", "'='", "')'", "<eof>"]);
    }
}
