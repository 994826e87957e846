//! Integration tests against live services
//!
//! Run with: cargo test -- --ignored

mod api_tests;
mod store_tests;
