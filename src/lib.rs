//! Workspace-level integration tests for FastFib.
//!
//! The tests live in `tests/`; this crate has no code of its own.
