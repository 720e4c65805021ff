use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::llm::CompletionClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: CompletionClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let llm = CompletionClient::new(&config.chat)?;
        Ok(Self {
            config: Arc::new(config),
            llm,
        })
    }
}
