//! Unit tests for the history module.

mod tokens_tests;
