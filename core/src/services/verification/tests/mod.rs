//! Tests for the verification workflow

mod prompt_tests;
