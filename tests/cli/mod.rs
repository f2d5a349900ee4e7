//! Tests that run the compiled binary.

pub mod binary_test;
pub mod common;
