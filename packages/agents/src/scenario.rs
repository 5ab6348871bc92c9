// ABOUTME: Generates simulation scenarios for the testing phase
// ABOUTME: Client feedback problems for education, investor questions for business

use std::sync::Arc;

use realworlded_ai::TextGenerator;
use realworlded_core::SessionContext;
use tracing::error;

use crate::fallbacks;
use crate::prompts::build_scenario_prompt;

pub struct ScenarioGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ScenarioGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate(&self, context: &SessionContext) -> String {
        if !self.generator.is_available() {
            return fallbacks::scenario(context.mode).to_string();
        }

        match self.generator.generate_text(&build_scenario_prompt(context)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => fallbacks::scenario(context.mode).to_string(),
            Err(e) => {
                error!("Error generating scenario: {}", e);
                fallbacks::scenario(context.mode).to_string()
            }
        }
    }
}
