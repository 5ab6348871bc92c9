// ABOUTME: Shared application state handed to every handler
// ABOUTME: Database storage, token issuer, and the persona agents

use std::sync::Arc;

use realworlded_agents::AgentSet;
use realworlded_security::TokenIssuer;
use realworlded_storage::DbState;

#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub tokens: Arc<TokenIssuer>,
    pub agents: Arc<AgentSet>,
}

impl AppState {
    pub fn new(db: DbState, tokens: TokenIssuer, agents: AgentSet) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            agents: Arc::new(agents),
        }
    }
}
