//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
///
/// All credentials and endpoints live here; collaborators never read the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// Upstream result-analysis endpoint of the assessment platform.
    pub examly_api_url: String,
    pub azure_openai_api_key: String,
    pub azure_openai_endpoint: String,
    pub azure_openai_api_version: String,
    pub azure_openai_model: String,
    /// Where the generated analysis report is written.
    pub report_output_path: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// This method is used internally to populate the singleton. Every value
    /// has a default, so nothing here panics; the AI insight strategy checks
    /// for missing Azure credentials itself.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "code-analyzer".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/analyzer.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "true".into()) == "true",
            examly_api_url: env::var("EXAMLY_API_URL").unwrap_or_else(|_| {
                "https://api.examly.io/api/v2/test/student/resultanalysis".into()
            }),
            azure_openai_api_key: env::var("AZURE_OPENAI_API_KEY").unwrap_or_default(),
            azure_openai_endpoint: env::var("AZURE_OPENAI_ENDPOINT").unwrap_or_default(),
            azure_openai_api_version: env::var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|_| "2024-02-15-preview".into()),
            azure_openai_model: env::var("AZURE_OPENAI_MODEL").unwrap_or_default(),
            report_output_path: env::var("REPORT_OUTPUT_PATH")
                .unwrap_or_else(|_| "analysis_report.txt".into()),
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
            let mut guard = lock.write().unwrap();
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

    /// Override `env` value.
    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_examly_api_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.examly_api_url = value.into());
    }

    pub fn set_azure_openai_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.azure_openai_api_key = value.into());
    }

    pub fn set_azure_openai_endpoint(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.azure_openai_endpoint = value.into());
    }

    pub fn set_azure_openai_api_version(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.azure_openai_api_version = value.into());
    }

    pub fn set_azure_openai_model(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.azure_openai_model = value.into());
    }

    pub fn set_report_output_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.report_output_path = value.into());
    }
}
