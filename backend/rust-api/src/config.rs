use serde::Deserialize;
use std::env;

use crate::backend;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_VIDEO_API_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app_env: String,
    pub bind_addr: String,

    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_key: Option<String>,

    pub completion_api_url: String,
    pub completion_api_key: Option<String>,
    pub completion_model: String,
    pub completion_timeout_seconds: u64,

    pub video_api_url: String,
    pub video_api_key: Option<String>,

    pub jwt_secret: String,
    pub token_ttl_seconds: i64,

    pub quiz_time_limit_seconds: u32,
    pub quiz_tick_interval_ms: u64,

    /// `user:password` guarding `/metrics`
    pub metrics_auth: String,
}

impl Default for Config {
    /// Demo-mode configuration: no hosted backend and no API keys.
    fn default() -> Self {
        Config {
            app_env: "dev".to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_key: None,
            completion_api_url: DEFAULT_COMPLETION_API_URL.to_string(),
            completion_api_key: None,
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            completion_timeout_seconds: 60,
            video_api_url: DEFAULT_VIDEO_API_URL.to_string(),
            video_api_key: None,
            jwt_secret: "dev-secret-only-for-local-testing".to_string(),
            token_ttl_seconds: 86_400,
            quiz_time_limit_seconds: crate::quiz::DEFAULT_TIME_LIMIT_SECONDS,
            quiz_tick_interval_ms: 1_000,
            metrics_auth: "admin:changeme".to_string(),
        }
    }
}

/// Treat blank values as unset.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first (two levels up), then the local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/{env}.toml, overridden by APP__SECTION__KEY variables
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let lookup = |key: &str, var: &str| -> Option<String> {
            settings
                .get_string(key)
                .ok()
                .or_else(|| env::var(var).ok())
                .and_then(non_empty)
        };
        let number = |key: &str, var: &str| -> Result<Option<i64>, config::ConfigError> {
            match lookup(key, var) {
                Some(raw) => raw.parse::<i64>().map(Some).map_err(|e| {
                    config::ConfigError::Message(format!("{} must be a number: {}", key, e))
                }),
                None => Ok(None),
            }
        };

        let defaults = Config::default();

        let jwt_secret = lookup("auth.jwt_secret", "JWT_SECRET").unwrap_or_else(|| {
            if app_env == "prod" {
                panic!("FATAL: JWT_SECRET must be set in production!");
            }
            eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
            defaults.jwt_secret.clone()
        });

        let config = Config {
            bind_addr: lookup("server.bind_addr", "BIND_ADDR").unwrap_or(defaults.bind_addr),
            supabase_url: lookup("supabase.url", "SUPABASE_URL").unwrap_or_default(),
            supabase_anon_key: lookup("supabase.anon_key", "SUPABASE_ANON_KEY")
                .unwrap_or_default(),
            supabase_service_key: lookup("supabase.service_key", "SUPABASE_SERVICE_KEY"),
            completion_api_url: lookup("completion.api_url", "COMPLETION_API_URL")
                .unwrap_or(defaults.completion_api_url),
            completion_api_key: lookup("completion.api_key", "OPENAI_API_KEY"),
            completion_model: lookup("completion.model", "COMPLETION_MODEL")
                .unwrap_or(defaults.completion_model),
            completion_timeout_seconds: number(
                "completion.timeout_seconds",
                "COMPLETION_TIMEOUT_SECONDS",
            )?
            .map(|n| n.max(1) as u64)
            .unwrap_or(defaults.completion_timeout_seconds),
            video_api_url: lookup("video.api_url", "VIDEO_API_URL")
                .unwrap_or(defaults.video_api_url),
            video_api_key: lookup("video.api_key", "YOUTUBE_API_KEY"),
            jwt_secret,
            token_ttl_seconds: number("auth.token_ttl_seconds", "TOKEN_TTL_SECONDS")?
                .unwrap_or(defaults.token_ttl_seconds),
            quiz_time_limit_seconds: number("quiz.time_limit_seconds", "QUIZ_TIME_LIMIT_SECONDS")?
                .map(|n| n.clamp(1, u32::MAX as i64) as u32)
                .unwrap_or(defaults.quiz_time_limit_seconds),
            quiz_tick_interval_ms: number("quiz.tick_interval_ms", "QUIZ_TICK_INTERVAL_MS")?
                .map(|n| n.max(1) as u64)
                .unwrap_or(defaults.quiz_tick_interval_ms),
            metrics_auth: lookup("metrics.auth", "METRICS_AUTH").unwrap_or_else(|| {
                if app_env == "prod" {
                    eprintln!("WARNING: METRICS_AUTH not set, using default credentials");
                }
                defaults.metrics_auth
            }),
            app_env,
        };

        Ok(config)
    }

    pub fn is_backend_configured(&self) -> bool {
        backend::is_configured(&self.supabase_url, &self.supabase_anon_key)
    }

    pub fn has_completion_key(&self) -> bool {
        self.completion_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_demo_mode() {
        let config = Config::default();
        assert!(!config.is_backend_configured());
        assert!(!config.has_completion_key());
        assert_eq!(config.bind_addr, "0.0.0.0:8081");
        assert_eq!(config.quiz_time_limit_seconds, 1800);
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert_eq!(non_empty("   ".to_string()), None);
        assert_eq!(non_empty(" key ".to_string()), Some("key".to_string()));
    }
}
