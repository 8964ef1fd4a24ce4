//! Unit tests for the advisor module.

mod json_file_tests;
