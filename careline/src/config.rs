use serde::Deserialize;
use std::env;

/// Sampling temperature sent with every upstream request.
pub const TEMPERATURE: f32 = 0.4;

/// Bounds applied to the configured max output token count.
const MIN_MAX_TOKENS: u32 = 1;
const MAX_MAX_TOKENS: u32 = 4096;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a JSON-encoded array of origins.
///
/// Any parse failure yields the empty list, so a malformed allow-list
/// denies every cross-origin read instead of opening the endpoint up.
pub fn parse_origins(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(origins) => origins,
        Err(e) => {
            tracing::warn!("Invalid origin allow-list '{}': {}. Using empty list.", raw, e);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Chat proxy configuration, read once at startup and injected into the
/// handler state. Handlers never read the environment directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Origins permitted to receive a non-empty `Access-Control-Allow-Origin`.
    pub allowed_origins: Vec<String>,
    /// System prompt override. `None` means the built-in policy prompt.
    pub system_prompt: Option<String>,
    /// Model identifier passed through to the completion API.
    pub model: String,
    /// Bearer credential for the completion API.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible completion API.
    pub base_url: String,
    /// Max output tokens, clamped to `1..=4096`.
    pub max_tokens: u32,
    /// Upstream HTTP client timeout.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            allowed_origins: env::var("CHAT_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            system_prompt: env::var("CHAT_SYSTEM_PROMPT").ok(),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            max_tokens: parse_env_or("CHAT_MAX_TOKENS", 320)
                .clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS),
            timeout_secs: parse_env_or("CHAT_TIMEOUT_SECS", 30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("CARELINE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CARELINE_PORT", 3000),
            },
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-var tests share process state and must not interleave.
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_origins_valid_list() {
        let origins = parse_origins(r#"["https://phyllishomecare.com","http://localhost:8080"]"#);
        assert_eq!(
            origins,
            vec![
                "https://phyllishomecare.com".to_string(),
                "http://localhost:8080".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_empty_array() {
        assert!(parse_origins("[]").is_empty());
    }

    #[test]
    fn test_parse_origins_fails_closed_on_garbage() {
        assert!(parse_origins("not json").is_empty());
        assert!(parse_origins(r#"{"origin":"https://a.com"}"#).is_empty());
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_chat_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("CHAT_ALLOWED_ORIGINS");
        std::env::remove_var("CHAT_SYSTEM_PROMPT");
        std::env::remove_var("OPENAI_MODEL");
        std::env::remove_var("OPENAI_BASE_URL");
        std::env::remove_var("CHAT_MAX_TOKENS");
        std::env::remove_var("CHAT_TIMEOUT_SECS");

        let config = ChatConfig::default();
        assert!(config.allowed_origins.is_empty());
        assert!(config.system_prompt.is_none());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.max_tokens, 320);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_chat_config_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("CHAT_ALLOWED_ORIGINS", r#"["https://phyllishomecare.com"]"#);
        std::env::set_var("OPENAI_MODEL", "gpt-4o");
        std::env::set_var("CHAT_MAX_TOKENS", "256");

        let config = ChatConfig::default();
        assert_eq!(config.allowed_origins, vec!["https://phyllishomecare.com"]);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 256);

        std::env::remove_var("CHAT_ALLOWED_ORIGINS");
        std::env::remove_var("OPENAI_MODEL");
        std::env::remove_var("CHAT_MAX_TOKENS");
    }

    #[test]
    fn test_max_tokens_clamped() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("CHAT_MAX_TOKENS", "999999");
        let config = ChatConfig::default();
        assert_eq!(config.max_tokens, 4096);

        std::env::set_var("CHAT_MAX_TOKENS", "0");
        let config = ChatConfig::default();
        assert_eq!(config.max_tokens, 1);

        std::env::remove_var("CHAT_MAX_TOKENS");
    }

    #[test]
    fn test_max_tokens_unparsable_uses_default() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("CHAT_MAX_TOKENS", "-5");
        let config = ChatConfig::default();
        assert_eq!(config.max_tokens, 320);
        std::env::remove_var("CHAT_MAX_TOKENS");
    }

    #[test]
    fn test_malformed_allow_list_fails_closed() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("CHAT_ALLOWED_ORIGINS", "https://no-brackets.com");
        let config = ChatConfig::default();
        assert!(config.allowed_origins.is_empty());
        std::env::remove_var("CHAT_ALLOWED_ORIGINS");
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("CARELINE_HOST");
        std::env::remove_var("CARELINE_PORT");
        let config = Config::from_env();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }
}
