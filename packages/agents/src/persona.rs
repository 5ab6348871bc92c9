// ABOUTME: Persona registry for the chat agents
// ABOUTME: Loads role, goal, and backstory definitions from config/personas.json at build time

use std::collections::HashMap;

use realworlded_core::AgentType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to load persona config: {0}")]
    LoadError(String),
    #[error("Persona not found: {0}")]
    NotFound(AgentType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub agent_type: AgentType,
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Persona {
    /// Opening block of every prompt written in this persona's voice
    pub fn system_block(&self) -> String {
        format!(
            "You are {}.\nGoal: {}\nBackstory: {}",
            self.role, self.goal, self.backstory
        )
    }
}

#[derive(Debug, Deserialize)]
struct PersonasConfig {
    #[allow(dead_code)]
    version: String,
    personas: Vec<Persona>,
}

pub struct PersonaRegistry {
    personas: HashMap<AgentType, Persona>,
}

impl PersonaRegistry {
    pub fn new() -> Result<Self, AgentError> {
        let config_json = include_str!("../config/personas.json");
        let config: PersonasConfig =
            serde_json::from_str(config_json).map_err(|e| AgentError::LoadError(e.to_string()))?;

        let personas = config
            .personas
            .into_iter()
            .map(|persona| (persona.agent_type, persona))
            .collect();

        Ok(Self { personas })
    }

    pub fn get(&self, agent_type: AgentType) -> Option<&Persona> {
        self.personas.get(&agent_type)
    }

    pub fn require(&self, agent_type: AgentType) -> Result<&Persona, AgentError> {
        self.get(agent_type).ok_or(AgentError::NotFound(agent_type))
    }
}
