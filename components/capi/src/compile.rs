//! Bytecode compilation across the boundary
//!
//! Compilation returns a tagged result: a success payload holding the
//! serialized module, or a failure payload holding a single formatted error
//! line. The payload bytes are additionally self-describing (the serialized
//! format's version byte is never zero, the error marker always is), so
//! callers reading only the buffer can still tell the cases apart.

use crate::alloc::{alloc_bytes, free_bytes};
use crate::parse::ParseResultHandle;
use bytecode_system::serialize;
use core_types::Span;
use parser::NameInterner;
use static_assertions::assert_eq_size;

/// Compilation knobs crossing the boundary.
///
/// The layout must match the compiler's native options struct byte for
/// byte; the size is checked at build time.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    /// 0 disables optimizations, 1+ enables constant folding
    pub optimization_level: i32,
    /// 0 strips source positions from emitted instructions, 1+ keeps them
    pub debug_level: i32,
    /// Reserved, pass 0
    pub coverage_level: i32,
}

assert_eq_size!(CompileOptions, parser::CompileOptions);

impl From<CompileOptions> for parser::CompileOptions {
    fn from(options: CompileOptions) -> Self {
        Self {
            optimization_level: options.optimization_level,
            debug_level: options.debug_level,
            coverage_level: options.coverage_level,
        }
    }
}

/// Outcome of [`lumen_compile`]: a caller-owned payload plus an explicit
/// success discriminant.
#[repr(C)]
pub struct CompileResult {
    /// True when `data` holds serialized bytecode, false when it holds a
    /// formatted error line
    pub ok: bool,
    /// Payload bytes, owned by the caller
    pub data: *mut u8,
    /// Byte length of `data`
    pub len: usize,
}

/// Format an error the way embedders expect it: `":<line+1>: <message>"`,
/// with a 1-based line number.
fn format_error_line(span: Span, message: &str) -> String {
    format!(":{}: {}", span.begin.line + 1, message)
}

/// Compile a parse result into serialized bytecode.
///
/// When the parse result carries diagnostics, only the first one is
/// reported, formatted as `":<line+1>: <message>"`; callers needing every
/// diagnostic must use
/// [`lumen_parseresult_get_errors`](crate::lumen_parseresult_get_errors).
/// Compile-time failures are reported the same way. Release the payload
/// with [`lumen_compile_free`].
///
/// Success payloads always use the version-prefixed format from
/// `bytecode_system::serialize`; there is no hook for a custom encoder.
///
/// # Safety
///
/// `handle` must be a live handle from [`lumen_parse`](crate::lumen_parse)
/// whose arena is still alive, and `interner` must be the interner that
/// parse used. `options` may be null, selecting the defaults.
#[no_mangle]
pub unsafe extern "C" fn lumen_compile(
    handle: *const ParseResultHandle,
    interner: *const NameInterner,
    options: *const CompileOptions,
) -> CompileResult {
    let handle = &*handle;
    let options: parser::CompileOptions = if options.is_null() {
        parser::CompileOptions::default()
    } else {
        (*options).into()
    };

    if let Some(first) = handle.result.diagnostics.first() {
        let line = format_error_line(first.span, &first.message);
        log::debug!("compile rejected: {}", line);
        return error_result(&line);
    }

    match parser::compile(&*handle.arena, &*interner, &handle.result, &options) {
        Ok(module) => {
            let bytes = serialize::encode_module(&module);
            let (data, len) = alloc_bytes(&bytes);
            CompileResult {
                ok: true,
                data,
                len,
            }
        }
        Err(error) => {
            let line = format_error_line(error.span, &error.message);
            log::debug!("compile failed: {}", line);
            error_result(&line)
        }
    }
}

fn error_result(line: &str) -> CompileResult {
    let bytes = serialize::encode_error(line);
    let (data, len) = alloc_bytes(&bytes);
    CompileResult {
        ok: false,
        data,
        len,
    }
}

/// Release a payload produced by [`lumen_compile`], for either outcome.
///
/// # Safety
///
/// `result` must come from a single [`lumen_compile`] call and must not
/// have been freed already.
#[no_mangle]
pub unsafe extern "C" fn lumen_compile_free(result: CompileResult) {
    free_bytes(result.data, result.len);
}
