// ABOUTME: User account module
// ABOUTME: Provides types and storage for registered learners

pub mod storage;
pub mod types;

#[cfg(test)]
mod storage_test;

pub use storage::*;
pub use types::*;
