//! Assertion reporting hook
//!
//! Internal invariant violations are fatal; this hook routes them through
//! the logging channel before the process dies, so embedders see what broke
//! instead of a bare abort.

use core_types::assert;

fn logging_handler(expr: &str, file: &str, line: u32, function: &str) {
    log::error!("{}({}): assertion failed in {}: {}", file, line, function, expr);
}

/// Install a process-wide assertion handler that reports the failing
/// expression, source location, and enclosing function through the logging
/// channel. Installing again replaces the previous handler; there is no
/// teardown.
#[no_mangle]
pub extern "C" fn lumen_install_assertion_handler() {
    assert::set_assertion_handler(logging_handler);
    log::debug!("assertion handler installed");
}
