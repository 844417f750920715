//! Integration test suite entry point.

mod fixture;
mod update_check_tests;
