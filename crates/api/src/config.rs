use storyforge_compiler::LlmSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Compilation calls
    /// wait on the LLM, so this sits above `LLM_TIMEOUT_SECS`.
    pub request_timeout_secs: u64,
    /// SQLite connection URL.
    pub database_url: String,
    pub db_max_connections: u32,
    /// LLM endpoint, model and fallback API key.
    pub llm: LlmSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                           |
    /// |------------------------|-----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                         |
    /// | `PORT`                 | `8001`                            |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`           |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                             |
    /// | `DATABASE_URL`         | `sqlite://storyforge.db?mode=rwc` |
    /// | `DB_MAX_CONNECTIONS`   | `10`                              |
    /// | `LLM_API_URL`          | `https://api.openai.com/v1`       |
    /// | `LLM_MODEL`            | `gpt-4o`                          |
    /// | `LLM_API_KEY`          | (none)                            |
    /// | `LLM_TIMEOUT_SECS`     | `90`                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://storyforge.db?mode=rwc".into());

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let llm = LlmSettings {
            api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o".into()),
            api_key: std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "90".into())
                .parse()
                .expect("LLM_TIMEOUT_SECS must be a valid u64"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
            llm,
        }
    }
}
