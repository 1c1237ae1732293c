//! Contract compliance tests for the C boundary
//!
//! Covers struct layout stability, ownership round trips, and the embedder
//! scenario the boundary was designed around.

use std::mem::{align_of, size_of};
use std::sync::Mutex;

use lumen_capi::{
    live_buffer_count, lumen_arena_free, lumen_arena_new, lumen_compile, lumen_compile_free,
    lumen_flags_free, lumen_flags_list, lumen_interner_free, lumen_interner_new, lumen_parse,
    lumen_parseresult_free, lumen_parseresult_free_errors, lumen_parseresult_free_hotcomments,
    lumen_parseresult_get_errors, lumen_parseresult_get_hotcomments, Buffer, CompileOptions,
    CompileResult, ErrorRecord, HotCommentRecord, Position, Span,
};

// Ownership tests compare the live-buffer counter before and after, so
// every test in this binary that produces boundary allocations serializes
// on this lock.
static COUNTER_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> std::sync::MutexGuard<'static, ()> {
    COUNTER_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// The POD layouts are a byte-for-byte compatibility contract with foreign
/// callers; any drift here breaks embedders silently.
#[test]
fn test_contract_pod_layouts() {
    assert_eq!(size_of::<Position>(), 8);
    assert_eq!(align_of::<Position>(), 4);
    assert_eq!(size_of::<Span>(), 16);

    assert_eq!(size_of::<CompileOptions>(), 12);
    assert_eq!(size_of::<CompileOptions>(), size_of::<parser::CompileOptions>());
    assert_eq!(align_of::<CompileOptions>(), 4);

    assert_eq!(size_of::<Buffer>(), 2 * size_of::<usize>());
    assert_eq!(size_of::<CompileResult>(), 3 * size_of::<usize>());

    // span + pointer + length, plus the leading header byte padded to
    // pointer alignment for hot comments.
    assert_eq!(size_of::<ErrorRecord>(), 16 + 2 * size_of::<usize>());
    assert_eq!(
        size_of::<HotCommentRecord>(),
        size_of::<usize>() + 16 + 2 * size_of::<usize>()
    );
}

/// Every produce/free pair must leave no boundary allocation behind, and
/// empty arrays must still be valid and freeable.
#[test]
fn test_contract_ownership_round_trips() {
    let _guard = lock();
    let before = live_buffer_count();

    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);
        let source = "--!strict\nlocal = 1\nprint(1)";
        let result = lumen_parse(source.as_ptr(), source.len(), interner, arena);

        let errors = lumen_parseresult_get_errors(result);
        assert!(errors.count >= 1);
        lumen_parseresult_free_errors(errors);

        let comments = lumen_parseresult_get_hotcomments(result);
        assert_eq!(comments.count, 1);
        lumen_parseresult_free_hotcomments(comments);

        let compiled = lumen_compile(result, interner, std::ptr::null());
        lumen_compile_free(compiled);

        let flags = lumen_flags_list();
        assert!(flags.count > 0);
        lumen_flags_free(flags);

        lumen_parseresult_free(result);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }

    assert_eq!(live_buffer_count(), before);
}

/// Producing from an empty input must still yield freeable arrays.
#[test]
fn test_contract_empty_arrays_round_trip() {
    let _guard = lock();
    let before = live_buffer_count();

    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);
        let source = "local x = 1";
        let result = lumen_parse(source.as_ptr(), source.len(), interner, arena);

        let errors = lumen_parseresult_get_errors(result);
        assert_eq!(errors.count, 0);
        assert!(!errors.records.is_null());
        lumen_parseresult_free_errors(errors);

        let comments = lumen_parseresult_get_hotcomments(result);
        assert_eq!(comments.count, 0);
        assert!(!comments.records.is_null());
        lumen_parseresult_free_hotcomments(comments);

        lumen_parseresult_free(result);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }

    assert_eq!(live_buffer_count(), before);
}

/// The embedder scenario: a syntax error on the second source line surfaces
/// as a diagnostic beginning at that line, and compile reports it as a
/// `":2: "` error payload.
#[test]
fn test_contract_second_line_error_scenario() {
    let _guard = lock();
    unsafe {
        let arena = lumen_arena_new();
        let interner = lumen_interner_new(arena);
        let source = "local x = 1\nlocal y = )";
        let result = lumen_parse(source.as_ptr(), source.len(), interner, arena);

        let errors = lumen_parseresult_get_errors(result);
        assert!(errors.count >= 1);
        let records = std::slice::from_raw_parts(errors.records, errors.count);
        assert_eq!(records[0].span.begin.line, 1);
        let message = String::from_utf8_lossy(std::slice::from_raw_parts(
            records[0].message,
            records[0].message_len,
        ))
        .into_owned();
        lumen_parseresult_free_errors(errors);

        let compiled = lumen_compile(result, interner, std::ptr::null());
        assert!(!compiled.ok);
        let bytes = std::slice::from_raw_parts(compiled.data, compiled.len);
        assert!(bytecode_system::serialize::is_error_payload(bytes));
        let line = String::from_utf8_lossy(&bytes[1..]).into_owned();
        assert_eq!(line, format!(":2: {}", message));
        lumen_compile_free(compiled);

        lumen_parseresult_free(result);
        lumen_interner_free(interner);
        lumen_arena_free(arena);
    }
}
