use std::path::PathBuf;

use crate::session::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Whether a non-admin viewer may select a chain-parent row in read-only
/// contexts. The five original page handlers disagreed on this; it is a
/// deployment policy here, not a hardcoded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainParentSelectPolicy {
    Allow,
    Block,
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub auth_token: Option<String>,
    pub session_role: Role,
    pub session_user_id: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub categories_path: Option<PathBuf>,
    pub chain_parent_select: ChainParentSelectPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[redacted]"))
            .field("session_role", &self.session_role)
            .field("session_user_id", &self.session_user_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("categories_path", &self.categories_path)
            .field("chain_parent_select", &self.chain_parent_select)
            .finish()
    }
}
