use crate::error::FuncLogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Уровень записи журнала вызовов
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Log,
    Debug,
    Error,
    Panic,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Log,
        Severity::Debug,
        Severity::Error,
        Severity::Panic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Log => "log",
            Severity::Debug => "debug",
            Severity::Error => "error",
            Severity::Panic => "panic",
        }
    }

    /// Метка в квадратных скобках, как она попадает в строку журнала: `[LOG]`
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "[INFO]",
            Severity::Log => "[LOG]",
            Severity::Debug => "[DEBUG]",
            Severity::Error => "[ERROR]",
            Severity::Panic => "[PANIC]",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Log
    }
}

impl FromStr for Severity {
    type Err = FuncLogError;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "log" => Ok(Severity::Log),
            "debug" => Ok(Severity::Debug),
            "error" => Ok(Severity::Error),
            "panic" => Ok(Severity::Panic),
            _ => Err(FuncLogError::InvalidSeverity(level.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Разбирает уровень; при ошибке пишет предупреждение и возвращает `None`.
/// Используется всеми сеттерами, чтобы кривая конфигурация не ломала вызов.
pub(crate) fn parse_or_warn(level: &str) -> Option<Severity> {
    match level.parse::<Severity>() {
        Ok(severity) => Some(severity),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("Error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!(" panic ".parse::<Severity>().unwrap(), Severity::Panic);
    }

    #[test]
    fn test_invalid_severity_names_valid_values() {
        let err = "bogus".parse::<Severity>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"bogus\""));
        for severity in Severity::ALL {
            assert!(msg.contains(severity.as_str()));
        }
    }

    #[test]
    fn test_tags() {
        assert_eq!(Severity::Log.tag(), "[LOG]");
        assert_eq!(Severity::Error.tag(), "[ERROR]");
        assert_eq!(Severity::default(), Severity::Log);
    }

    #[test]
    fn test_parse_or_warn_keeps_none_on_garbage() {
        assert_eq!(parse_or_warn("bogus"), None);
        assert_eq!(parse_or_warn("debug"), Some(Severity::Debug));
    }
}
