//! Unit test entry point for capi

mod test_flags;
