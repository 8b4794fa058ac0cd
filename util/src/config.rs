//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{OnceLock, RwLock};

use rand::RngCore;
use rand::rngs::OsRng;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub media_root: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub secret_key_file: String,
    pub jwt_duration_minutes: u64,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every value has a default, so this never panics. When `JWT_SECRET` is
    /// not set the signing secret is read from (or generated into) the file
    /// named by `SECRET_KEY_FILE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let secret_key_file = var_or("SECRET_KEY_FILE", ".secret_key");
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => load_or_create_secret(Path::new(&secret_key_file)).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not persist secret key; using an ephemeral one");
                random_secret()
            }),
        };

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "lumino"),
            log_level: var_or("LOG_LEVEL", "info"),
            log_dir: var_or("LOG_DIR", "logs"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "true") == "true",
            database_path: var_or("DATABASE_PATH", "data/lumino.db"),
            media_root: var_or("MEDIA_ROOT", "documents"),
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 8000),
            jwt_secret,
            secret_key_file,
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 1440),
            llm_api_key: env::var("LLM_API_KEY")
                .or_else(|_| env::var("DEEPSEEK_API_KEY"))
                .unwrap_or_default(),
            llm_base_url: var_or("LLM_BASE_URL", "https://api.deepseek.com"),
            llm_model: var_or("LLM_MODEL", "deepseek-chat"),
            llm_temperature: parse_or("LLM_TEMPERATURE", 0.7),
            llm_max_tokens: parse_or("LLM_MAX_TOKENS", 8000),
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", 120),
            cors_origins: var_or("CORS_ORIGINS", "http://localhost:5173,http://localhost:3000")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_dir = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_media_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.media_root = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_llm_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.llm_api_key = value.into());
    }

    pub fn set_llm_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.llm_base_url = value.into());
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Reads the signing secret from `path`, creating it with a fresh random
/// value (owner read/write only) when it does not exist yet.
pub fn load_or_create_secret(path: &Path) -> io::Result<String> {
    if path.exists() {
        let secret = fs::read_to_string(path)?.trim().to_string();
        if !secret.is_empty() {
            return Ok(secret);
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let secret = random_secret();
    fs::write(path, &secret)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(secret)
}

// --- Shorthand accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_dir() -> String {
    AppConfig::global().log_dir.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn media_root() -> String {
    AppConfig::global().media_root.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn cors_origins() -> Vec<String> {
    AppConfig::global().cors_origins.clone()
}
