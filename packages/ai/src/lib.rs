// ABOUTME: Generative AI integration for RealWorldEd
// ABOUTME: Gemini REST client and the text generation trait used by the agents

pub mod generator;
pub mod service;

pub use generator::TextGenerator;
pub use service::{
    parse_json_reply, strip_code_fences, AIServiceError, AIServiceResult, GeminiService,
};
