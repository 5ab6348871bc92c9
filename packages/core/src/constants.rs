// ABOUTME: Environment variable names and default values
// ABOUTME: Centralized definitions shared by the server config and domain logic

// Server Configuration
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";

// Database Configuration
pub const DATABASE_URL: &str = "DATABASE_URL";

// JWT Configuration
pub const SECRET_KEY: &str = "SECRET_KEY";
pub const ACCESS_TOKEN_EXPIRE_MINUTES: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";

// Gemini Configuration
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./realworlded.db";
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-change-in-production";
/// 30 days
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 43_200;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:5174,http://localhost:3000";

pub const SERVICE_NAME: &str = "RealWorldEd API";

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Number of prior messages included when prompting a persona agent
pub const HISTORY_WINDOW: usize = 10;

/// A session needs at least this many messages before it can be evaluated
pub const MIN_MESSAGES_FOR_EVALUATION: i64 = 5;

/// Upper bound of every evaluation score
pub const MAX_SCORE: f64 = 10.0;

// Demo account created by `realworlded create-demo-user`
pub const DEMO_USER_EMAIL: &str = "demo@realworlded.com";
pub const DEMO_USER_USERNAME: &str = "demo_user";
pub const DEMO_USER_FULL_NAME: &str = "Demo User";
pub const DEMO_USER_PASSWORD: &str = "demo123";
