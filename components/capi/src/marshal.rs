//! Result marshaling into flat caller-owned arrays
//!
//! Diagnostics and hot comments are copied out of a parse result into
//! length-prefixed arrays of fixed-layout records. Text buffers carry an
//! explicit length and no terminator, so embedded nulls survive. Every
//! getter has exactly one paired free; empty inputs still yield a valid,
//! freeable zero-length array with a non-null pointer.

use crate::alloc::{alloc_array, alloc_bytes, free_array, free_bytes};
use crate::parse::ParseResultHandle;

/// A source position, 0-based line and column.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 0-based line number
    pub line: u32,
    /// 0-based column number
    pub column: u32,
}

/// A half-open source range.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First covered position
    pub begin: Position,
    /// One past the last covered position
    pub end: Position,
}

fn marshal_span(span: core_types::Span) -> Span {
    Span {
        begin: Position {
            line: span.begin.line,
            column: span.begin.column,
        },
        end: Position {
            line: span.end.line,
            column: span.end.column,
        },
    }
}

/// One marshaled hot comment.
#[repr(C)]
pub struct HotCommentRecord {
    /// True when the comment appeared before any token
    pub header: bool,
    /// Location of the comment
    pub span: Span,
    /// Comment text, excluding the introducer; not null-terminated
    pub text: *mut u8,
    /// Byte length of `text`
    pub text_len: usize,
}

/// One marshaled diagnostic.
#[repr(C)]
pub struct ErrorRecord {
    /// Location of the error
    pub span: Span,
    /// Formatted message; not null-terminated
    pub message: *mut u8,
    /// Byte length of `message`
    pub message_len: usize,
}

/// A caller-owned array of hot-comment records.
#[repr(C)]
pub struct HotCommentArray {
    /// Record storage, non-null even when `count` is zero
    pub records: *mut HotCommentRecord,
    /// Number of records
    pub count: usize,
}

/// A caller-owned array of error records.
#[repr(C)]
pub struct ErrorArray {
    /// Record storage, non-null even when `count` is zero
    pub records: *mut ErrorRecord,
    /// Number of records
    pub count: usize,
}

/// Copy every hot comment out of a parse result, in encounter order.
/// Release with [`lumen_parseresult_free_hotcomments`].
///
/// # Safety
///
/// `handle` must be a live handle from [`lumen_parse`](crate::lumen_parse).
#[no_mangle]
pub unsafe extern "C" fn lumen_parseresult_get_hotcomments(
    handle: *const ParseResultHandle,
) -> HotCommentArray {
    let handle = &*handle;
    let records: Vec<HotCommentRecord> = handle
        .result
        .hot_comments
        .iter()
        .map(|comment| {
            let (text, text_len) = alloc_bytes(comment.text.as_bytes());
            HotCommentRecord {
                header: comment.header,
                span: marshal_span(comment.span),
                text,
                text_len,
            }
        })
        .collect();
    let (records, count) = alloc_array(records);
    HotCommentArray { records, count }
}

/// Release an array produced by [`lumen_parseresult_get_hotcomments`],
/// including every per-record text buffer.
///
/// # Safety
///
/// `array` must come from a single `lumen_parseresult_get_hotcomments` call
/// and must not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn lumen_parseresult_free_hotcomments(array: HotCommentArray) {
    for record in free_array(array.records, array.count) {
        free_bytes(record.text, record.text_len);
    }
}

/// Copy every diagnostic out of a parse result, in source order. The first
/// record is the one [`lumen_compile`](crate::lumen_compile) reports on.
/// Release with [`lumen_parseresult_free_errors`].
///
/// # Safety
///
/// `handle` must be a live handle from [`lumen_parse`](crate::lumen_parse).
#[no_mangle]
pub unsafe extern "C" fn lumen_parseresult_get_errors(
    handle: *const ParseResultHandle,
) -> ErrorArray {
    let handle = &*handle;
    let records: Vec<ErrorRecord> = handle
        .result
        .diagnostics
        .iter()
        .map(|diagnostic| {
            let (message, message_len) = alloc_bytes(diagnostic.message.as_bytes());
            ErrorRecord {
                span: marshal_span(diagnostic.span),
                message,
                message_len,
            }
        })
        .collect();
    let (records, count) = alloc_array(records);
    ErrorArray { records, count }
}

/// Release an array produced by [`lumen_parseresult_get_errors`], including
/// every per-record message buffer.
///
/// # Safety
///
/// `array` must come from a single `lumen_parseresult_get_errors` call and
/// must not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn lumen_parseresult_free_errors(array: ErrorArray) {
    for record in free_array(array.records, array.count) {
        free_bytes(record.message, record.message_len);
    }
}
