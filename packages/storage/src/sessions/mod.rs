// ABOUTME: Simulation session module
// ABOUTME: Provides types and storage for education and business sessions

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
