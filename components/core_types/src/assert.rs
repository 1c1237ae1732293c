//! Replaceable assertion-failure handler.
//!
//! Internal invariant violations are fatal, but embedders need to see them
//! before the process dies. A process-wide handler slot can be installed to
//! receive the failing expression, source location, and enclosing module;
//! after the handler runs, the violation still panics. Installing a handler
//! twice simply replaces the previous one, and there is no teardown.

use parking_lot::RwLock;

/// Callback invoked on an internal invariant violation, receiving the failing
/// expression text, source file, line, and enclosing module path.
pub type AssertionHandler = fn(expr: &str, file: &str, line: u32, function: &str);

static HANDLER: RwLock<Option<AssertionHandler>> = RwLock::new(None);

/// Install `handler` as the process-wide assertion handler, replacing any
/// previously installed one.
pub fn set_assertion_handler(handler: AssertionHandler) {
    *HANDLER.write() = Some(handler);
}

/// Report an assertion failure and abort the current operation.
///
/// Invoked by [`runtime_assert!`](crate::runtime_assert); not intended to be
/// called directly.
pub fn fail(expr: &str, file: &str, line: u32, function: &str) -> ! {
    if let Some(handler) = *HANDLER.read() {
        handler(expr, file, line, function);
    }
    panic!("{}({}): ASSERTION FAILED: {}", file, line, expr);
}

/// Assert an internal invariant, routing failures through the installed
/// assertion handler before panicking.
#[macro_export]
macro_rules! runtime_assert {
    ($cond:expr) => {
        if !$cond {
            $crate::assert::fail(stringify!($cond), file!(), line!(), module_path!());
        }
    };
}
