//! Shared test utilities for integration tests.
//! Included by the test files; not compiled as a test binary of its own.
#![allow(dead_code)]

pub mod fixtures;
pub mod mock;
