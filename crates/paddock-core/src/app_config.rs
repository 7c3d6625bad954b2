use std::path::PathBuf;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sites_path: PathBuf,
    /// Base URL of the external classification service. Points at a mock
    /// server in tests.
    pub classifier_base_url: String,
    pub classifier_api_key: Option<String>,
    pub classifier_model: String,
    pub classifier_timeout_secs: u64,
    /// Additional attempts after the first failure, for overload-class
    /// errors only.
    pub classifier_max_retries: u32,
    pub classifier_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("sites_path", &self.sites_path)
            .field("classifier_base_url", &self.classifier_base_url)
            .field(
                "classifier_api_key",
                &self.classifier_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("classifier_model", &self.classifier_model)
            .field("classifier_timeout_secs", &self.classifier_timeout_secs)
            .field("classifier_max_retries", &self.classifier_max_retries)
            .field(
                "classifier_backoff_base_ms",
                &self.classifier_backoff_base_ms,
            )
            .finish()
    }
}
