// ABOUTME: Authentication primitives for RealWorldEd
// ABOUTME: Argon2 password hashing and signed bearer tokens

pub mod error;
pub mod passwords;
pub mod tokens;

pub use error::SecurityError;
pub use passwords::{hash_password, verify_password};
pub use tokens::{Claims, IssuedToken, TokenIssuer};
