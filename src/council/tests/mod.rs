//! Unit tests for the council module.

mod service_tests;
