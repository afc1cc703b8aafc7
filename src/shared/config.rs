//! Application configuration. Progress presentation and demo executor settings.

use crate::domain::ProgressStyle;
use serde::Deserialize;

/// Message shown when the progress indicator first appears.
pub const DEFAULT_PROGRESS_MESSAGE: &str = "Starting operation…";

/// Delay between simulated executor steps, in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 150;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Initial indicator message. Read from CRYPTO_RESUME_PROGRESS_MESSAGE.
    #[serde(default)]
    pub progress_message: Option<String>,

    /// `horizontal` (determinate bar) or `spinner`. Read from CRYPTO_RESUME_PROGRESS_STYLE.
    #[serde(default)]
    pub progress_style: Option<ProgressStyle>,

    // ─────────────────────────────────────────────────────────────────────────
    // Simulated executor (demo binary)
    // ─────────────────────────────────────────────────────────────────────────
    /// Pause between simulated work steps. Read from CRYPTO_RESUME_EXECUTOR_STEP_DELAY_MS.
    #[serde(default)]
    pub executor_step_delay_ms: Option<u64>,

    /// Passphrase the simulated signing key is locked with. Read from CRYPTO_RESUME_DEMO_PASSPHRASE.
    #[serde(default)]
    pub demo_passphrase: Option<String>,

    /// Whether the simulated key lives on a hardware token. Read from CRYPTO_RESUME_DEMO_REQUIRE_TOKEN.
    #[serde(default)]
    pub demo_require_token: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("CRYPTO_RESUME_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("CRYPTO_RESUME").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn progress_message_or_default(&self) -> String {
        self.progress_message
            .clone()
            .unwrap_or_else(|| DEFAULT_PROGRESS_MESSAGE.to_string())
    }

    pub fn progress_style_or_default(&self) -> ProgressStyle {
        self.progress_style.unwrap_or_default()
    }

    /// Returns the simulated step delay. Defaults to DEFAULT_STEP_DELAY_MS.
    pub fn executor_step_delay_ms_or_default(&self) -> u64 {
        self.executor_step_delay_ms.unwrap_or(DEFAULT_STEP_DELAY_MS)
    }

    /// Returns the demo passphrase. Defaults to "hunter2".
    pub fn demo_passphrase_or_default(&self) -> String {
        self.demo_passphrase
            .clone()
            .unwrap_or_else(|| "hunter2".to_string())
    }

    pub fn demo_require_token(&self) -> bool {
        self.demo_require_token.unwrap_or(false)
    }
}
