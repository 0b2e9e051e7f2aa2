use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub display: DisplaySettings,
    pub console: ConsoleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Per-request limit in seconds. Zero disables it.
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub utc_offset_minutes: i32,
}

impl DisplaySettings {
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).with_context(|| {
            format!(
                "display.utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleSettings {
    pub show_dashboard_after_chat: bool,
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(Path::new("config/assistant"))
}

/// Defaults, then the optional file at `path`, then `ASSISTANT__*` env vars.
pub fn load_config_from(path: &Path) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_secs", 30)?
        .set_default("display.utc_offset_minutes", 0)?
        .set_default("console.show_dashboard_after_chat", true)?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ASSISTANT")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let config: AppConfig = settings.try_deserialize()?;
    config.display.offset()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "assistant-console-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_config_from(Path::new("config/does-not-exist")).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.display.utc_offset_minutes, 0);
        assert!(config.console.show_dashboard_after_chat);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_temp_config(
            "override",
            "[api]\nbase_url = \"http://assistant.local:9000/api\"\ntimeout_secs = 0\n\n[display]\nutc_offset_minutes = -300\n",
        );
        let config = load_config_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api.base_url, "http://assistant.local:9000/api");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(
            config.display.offset().unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
        assert!(config.console.show_dashboard_after_chat);
    }

    #[test]
    fn test_rejects_out_of_range_offset() {
        let path = write_temp_config("offset", "[display]\nutc_offset_minutes = 100000\n");
        let result = load_config_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
