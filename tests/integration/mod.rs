//! Database integration tests.
//!
//! These tests require a running PostgreSQL database loaded with the news data.
//! Set DATABASE_URL environment variable to run them.

pub mod connection_test;
pub mod report_test;
