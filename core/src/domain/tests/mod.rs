//! Tests for domain value objects

#[cfg(test)]
mod decision_tests;
