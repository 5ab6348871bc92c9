// ABOUTME: Core types, constants, and validation for RealWorldEd
// ABOUTME: Foundational package shared by storage, agents, and the HTTP layer

pub mod constants;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{AgentType, MessageRole, Mode, ParseEnumError, SessionContext, SessionStatus, Stage};

// Re-export validation
pub use validation::{
    validate_email, validate_message, validate_password, validate_username, ValidationError,
};
