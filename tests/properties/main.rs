//! Property-based test suite entry point.

mod connection_tests;
mod version_tests;
