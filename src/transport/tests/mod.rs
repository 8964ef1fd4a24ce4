//! Unit tests for advisor invocation.

mod shell_tests;
