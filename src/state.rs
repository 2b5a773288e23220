use tokio::sync::Mutex;

use crate::analysis::Analyzer;
use crate::config::{AdminConfig, Config};
use crate::security::IntrusionGuard;

pub struct AppState {
    pub analyzer: Analyzer,
    pub guard: Mutex<IntrusionGuard>,
    pub api_token: String,
    pub admin_config: AdminConfig,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        AppState {
            analyzer: Analyzer::new(config.analysis),
            guard: Mutex::new(IntrusionGuard::new(config.guard)),
            api_token: config.api_token,
            admin_config: config.admin,
        }
    }
}
