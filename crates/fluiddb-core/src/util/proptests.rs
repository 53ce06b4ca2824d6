//! Property-based tests for path and query utilities.
