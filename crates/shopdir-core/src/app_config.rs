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

/// Runtime settings for loading and serving the shop directory.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Path or `http(s)://` URL of the combined shop CSV export.
    pub csv_source: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// Radius used by the zip-code proximity filter when the caller gives none.
    pub default_radius_miles: f64,
}
