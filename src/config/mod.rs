// src/config/mod.rs
// All tunables load from the environment (.env supported), with defaults
// that match the original 60-minute session design.

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RoyConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Session Configuration
    /// Seconds a session may sit idle before the sweeper removes it.
    pub session_idle_secs: u64,
    /// Seconds between sweeper passes.
    pub sweep_interval_secs: u64,
    /// Nominal session length in minutes.
    pub session_minutes: i64,
    /// Elapsed minutes after which composed prompts carry the wrap-up notice.
    pub wrap_up_after_minutes: i64,
    /// How many recent turns the prompt composer reads.
    pub history_window: usize,
    /// Upper bound on history page size served over the API.
    pub history_max_limit: usize,

    // ── Anthropic (chat completion)
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub anthropic_max_tokens: u32,
    pub chat_temperature: f32,

    // ── OpenAI (speech in both directions)
    pub openai_base_url: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub stt_model: String,

    // ── Stability (text-to-image)
    pub stability_base_url: String,
    pub stability_engine: String,

    // ── Logging Configuration
    pub log_level: String,
}

/// Parse an environment variable, tolerating trailing comments and
/// whitespace. Missing or unparseable values fall back to the default.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl RoyConfig {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("ROY_HOST", "0.0.0.0".to_string()),
            port: env_var_or("ROY_PORT", 3001),
            cors_origin: env_var_or("ROY_CORS_ORIGIN", "*".to_string()),
            session_idle_secs: env_var_or("ROY_SESSION_IDLE_SECS", 3600),
            sweep_interval_secs: env_var_or("ROY_SWEEP_INTERVAL_SECS", 300),
            session_minutes: env_var_or("ROY_SESSION_MINUTES", 60),
            wrap_up_after_minutes: env_var_or("ROY_WRAP_UP_AFTER_MINUTES", 55),
            history_window: env_var_or("ROY_HISTORY_WINDOW", 12),
            history_max_limit: env_var_or("ROY_HISTORY_MAX_LIMIT", 100),
            anthropic_base_url: env_var_or(
                "ANTHROPIC_BASE_URL",
                "https://api.anthropic.com".to_string(),
            ),
            anthropic_model: env_var_or(
                "ROY_CHAT_MODEL",
                "claude-3-7-sonnet-20250219".to_string(),
            ),
            anthropic_max_tokens: env_var_or("ROY_CHAT_MAX_TOKENS", 2000),
            chat_temperature: env_var_or("ROY_CHAT_TEMPERATURE", 0.7),
            openai_base_url: env_var_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com/v1".to_string(),
            ),
            tts_model: env_var_or("ROY_TTS_MODEL", "tts-1".to_string()),
            tts_voice: env_var_or("ROY_TTS_VOICE", "onyx".to_string()),
            stt_model: env_var_or("ROY_STT_MODEL", "whisper-1".to_string()),
            stability_base_url: env_var_or(
                "STABILITY_BASE_URL",
                "https://api.stability.ai".to_string(),
            ),
            stability_engine: env_var_or(
                "ROY_IMAGE_ENGINE",
                "stable-diffusion-xl-1024-v1-0".to_string(),
            ),
            log_level: env_var_or("ROY_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods for Common Operations ---

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle threshold for the session sweeper
    pub fn idle_threshold(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_idle_secs as i64)
    }

    /// Interval between sweeper passes
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<RoyConfig> = Lazy::new(RoyConfig::from_env);
