use crate::record::severity::parse_or_warn;
use crate::record::Severity;
use crate::services::sink::MirrorTarget;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
}

/// Диагностический вывод самого приложения (tracing)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `compact` или `full`
    pub format: String,
    /// Директивы EnvFilter, если не заданы `RUST_LOG` и `--log-level`
    pub filter: String,
}

/// Журнал вызовов
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecorderConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    // Строкой, а не Severity: неверное значение не должно ломать загрузку конфигурации
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub persist_success: bool,
    #[serde(default)]
    pub mirror: MirrorTarget,
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("funclog")
        .join("calls.log")
}

fn default_severity() -> String {
    Severity::default().as_str().to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            filter: "funclog=info".to_string(),
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            severity: default_severity(),
            enabled: true,
            persist_success: true,
            mirror: MirrorTarget::None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            recorder: RecorderConfig::default(),
        }
    }
}

impl RecorderConfig {
    /// Неверное значение: предупреждение и уровень по умолчанию
    pub fn severity(&self) -> Severity {
        parse_or_warn(&self.severity).unwrap_or_default()
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("FUNCLOG_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация журнала вызовов
        if self.recorder.log_file.as_os_str().is_empty() {
            anyhow::bail!("log_file не может быть пустым");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recorder.severity(), Severity::Log);
        assert!(config.recorder.log_file.ends_with("funclog/calls.log"));
    }

    #[test]
    fn test_invalid_severity_falls_back_to_default() {
        let mut config = Config::default();
        config.recorder.severity = "bogus".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.recorder.severity(), Severity::Log);
    }

    #[test]
    fn test_invalid_logging_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funclog.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[logging]
format = "full"
filter = "funclog=debug"

[recorder]
log_file = "/tmp/qtile_user_function.log"
severity = "DEBUG"
persist_success = false
mirror = "stderr"
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.format, "full");
        assert_eq!(config.logging.filter, "funclog=debug");
        assert_eq!(config.recorder.severity(), Severity::Debug);
        assert!(config.recorder.enabled);
        assert!(!config.recorder.persist_success);
        assert_eq!(config.recorder.mirror, MirrorTarget::Stderr);
        assert_eq!(config.recorder.log_file, PathBuf::from("/tmp/qtile_user_function.log"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.recorder.mirror, MirrorTarget::None);
        assert!(config.recorder.persist_success);
    }
}
