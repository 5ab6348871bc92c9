// ABOUTME: Persona agents that drive a RealWorldEd session
// ABOUTME: Prompt building, canned fallbacks, evaluation, scenarios, and stage routing

pub mod agent;
pub mod evaluator;
pub mod fallbacks;
pub mod persona;
pub mod prompts;
pub mod scenario;
pub mod stages;

use std::sync::Arc;

use realworlded_ai::TextGenerator;
use realworlded_core::{AgentType, Stage};

pub use agent::PersonaAgent;
pub use evaluator::{Evaluation, EvaluationSource, Evaluator};
pub use persona::{AgentError, Persona, PersonaRegistry};
pub use prompts::ChatTurn;
pub use scenario::ScenarioGenerator;
pub use stages::{detect_transition, select_agent};

/// Every agent the API needs, sharing one text generator
pub struct AgentSet {
    pub mentor: PersonaAgent,
    pub client: PersonaAgent,
    pub evaluator: Evaluator,
    pub scenarios: ScenarioGenerator,
}

impl AgentSet {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Result<Self, AgentError> {
        let registry = PersonaRegistry::new()?;

        Ok(Self {
            mentor: PersonaAgent::new(
                AgentType::Mentor,
                registry.require(AgentType::Mentor)?.clone(),
                generator.clone(),
            ),
            client: PersonaAgent::new(
                AgentType::Client,
                registry.require(AgentType::Client)?.clone(),
                generator.clone(),
            ),
            evaluator: Evaluator::new(
                registry.require(AgentType::Evaluator)?.clone(),
                generator.clone(),
            ),
            scenarios: ScenarioGenerator::new(generator),
        })
    }

    /// Persona that answers chat messages at the given stage
    pub fn agent_for(&self, stage: Stage) -> &PersonaAgent {
        match select_agent(stage) {
            AgentType::Client => &self.client,
            _ => &self.mentor,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubGenerator;

    #[test]
    fn test_agent_set_routes_by_stage() {
        let agents = AgentSet::new(Arc::new(StubGenerator::unavailable())).unwrap();

        assert_eq!(agents.agent_for(Stage::Started).kind(), AgentType::Mentor);
        assert_eq!(agents.agent_for(Stage::Guidance).kind(), AgentType::Mentor);
        assert_eq!(agents.agent_for(Stage::Testing).kind(), AgentType::Client);
        assert_eq!(agents.agent_for(Stage::Simulation).kind(), AgentType::Client);
        assert_eq!(agents.agent_for(Stage::BusinessSelected).kind(), AgentType::Mentor);
        assert_eq!(agents.client.persona().role, "Client/Investor");
    }
}
