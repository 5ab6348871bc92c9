// ABOUTME: Persona agent that answers chat messages through the text generator
// ABOUTME: Falls back to canned replies when the model is unavailable or errors

use std::sync::Arc;

use realworlded_ai::TextGenerator;
use realworlded_core::{AgentType, SessionContext};
use tracing::{debug, error};

use crate::fallbacks;
use crate::persona::Persona;
use crate::prompts::{build_chat_prompt, ChatTurn};

pub struct PersonaAgent {
    kind: AgentType,
    persona: Persona,
    generator: Arc<dyn TextGenerator>,
}

impl PersonaAgent {
    pub fn new(kind: AgentType, persona: Persona, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            kind,
            persona,
            generator,
        }
    }

    pub fn kind(&self) -> AgentType {
        self.kind
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Reply to `message` given the session context and prior turns. Never fails.
    pub async fn respond(
        &self,
        message: &str,
        context: &SessionContext,
        history: &[ChatTurn],
    ) -> String {
        if !self.generator.is_available() {
            debug!("{} answering with canned reply", self.persona.role);
            return self.fallback(context);
        }

        let prompt = build_chat_prompt(&self.persona, context, history, message);
        match self.generator.generate_text(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error generating response from {}: {}", self.persona.role, e);
                self.fallback(context)
            }
        }
    }

    fn fallback(&self, context: &SessionContext) -> String {
        match self.kind {
            AgentType::Mentor => fallbacks::mentor_reply(context),
            AgentType::Client => fallbacks::client_reply(context.mode),
            _ => fallbacks::generic_reply(&self.persona.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaRegistry;
    use crate::test_support::StubGenerator;
    use realworlded_core::{MessageRole, Mode};

    fn agent(kind: AgentType, generator: Arc<StubGenerator>) -> PersonaAgent {
        let persona = PersonaRegistry::new().unwrap().require(kind).unwrap().clone();
        PersonaAgent::new(kind, persona, generator)
    }

    #[tokio::test]
    async fn test_model_reply_is_returned() {
        let generator = Arc::new(StubGenerator::replying("Let's pick a project."));
        let mentor = agent(AgentType::Mentor, generator.clone());

        let history = vec![ChatTurn::new(MessageRole::User, "Hi")];
        let reply = mentor
            .respond("I like python", &SessionContext::new(Mode::Education), &history)
            .await;

        assert_eq!(reply, "Let's pick a project.");
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.starts_with("You are AI Mentor."));
        assert!(prompt.contains("User: Hi\n\nUser: I like python\n\nAssistant:"));
    }

    #[tokio::test]
    async fn test_unavailable_model_uses_canned_reply() {
        let generator = Arc::new(StubGenerator::unavailable());
        let client = agent(AgentType::Client, generator.clone());

        let reply = client
            .respond("Here is my pitch", &SessionContext::new(Mode::Business), &[])
            .await;

        assert!(reply.contains("Why should I invest"));
        assert!(generator.last_prompt().is_none());
    }

    #[tokio::test]
    async fn test_model_error_uses_canned_reply() {
        let generator = Arc::new(StubGenerator::failing("503 Service Unavailable"));
        let mentor = agent(AgentType::Mentor, generator);

        let mut context = SessionContext::new(Mode::Education);
        context.subject = Some("java".to_string());
        let reply = mentor.respond("help", &context, &[]).await;

        assert!(reply.contains("guide you through java"));
    }

    #[tokio::test]
    async fn test_evaluator_persona_gets_generic_fallback() {
        let evaluator = agent(AgentType::Evaluator, Arc::new(StubGenerator::unavailable()));
        let reply = evaluator
            .respond("hi", &SessionContext::new(Mode::Education), &[])
            .await;
        assert!(reply.starts_with("I'm AI Evaluator"));
    }
}
