// ABOUTME: Evaluation report module
// ABOUTME: Provides types and storage for scored session reports

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
