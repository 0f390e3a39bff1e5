use std::sync::Arc;

use carillon_core::{ConsoleConfig, EditorSession};
use tokio::sync::RwLock;

/// Holds all shared state for the console.
/// This is a lightweight container - logic lives in the core types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<ConsoleConfig>>,
    /// The editing session against the configured appliance.
    pub session: Arc<RwLock<EditorSession>>,
}

impl CliContext {
    pub fn new(config: ConsoleConfig, session: EditorSession) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: Arc::new(RwLock::new(session)),
        }
    }
}
