use super::args::CapturedArgs;
use super::severity::{parse_or_warn, Severity};
use super::value::Value;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Категория обёрнутого объекта; определяется классификатором один раз
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Function,
    Method,
    Class,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Function => "Function",
            Category::Method => "Method",
            Category::Class => "Class",
        }
    }

    /// Глагол взаимодействия в строке журнала
    pub fn interact_verb(&self) -> &'static str {
        match self {
            Category::Class => "instantiated",
            Category::Function | Category::Method => "called",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Описание ошибки обёрнутого вызова (само значение ошибки возвращается вызывающему)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    pub type_name: String,
    pub message: String,
}

impl FailureInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// Ровно одно из двух: результат или ошибка
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Returned(Value),
    Failed(FailureInfo),
}

/// Запись об одном завершённом вызове
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    severity: Severity,
    callable_name: String,
    category: Category,
    args: CapturedArgs,
    outcome: CallOutcome,
    timestamp: DateTime<Local>,
}

impl InvocationRecord {
    /// Успешный вызов: уровень берётся из снимка настроек логгера
    pub fn succeeded(
        callable_name: impl Into<String>,
        category: Category,
        args: CapturedArgs,
        value: Value,
        severity: Severity,
    ) -> Self {
        Self {
            severity,
            callable_name: callable_name.into(),
            category,
            args,
            outcome: CallOutcome::Returned(value),
            timestamp: Local::now(),
        }
    }

    /// Неудачный вызов: уровень всегда `Error`, независимо от настроек
    pub fn failed(
        callable_name: impl Into<String>,
        category: Category,
        args: CapturedArgs,
        failure: FailureInfo,
    ) -> Self {
        Self {
            severity: Severity::Error,
            callable_name: callable_name.into(),
            category,
            args,
            outcome: CallOutcome::Failed(failure),
            timestamp: Local::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Меняет уровень записи. Неизвестное значение не меняет ничего, только предупреждение в лог.
    pub fn set_level(&mut self, level: &str) -> &mut Self {
        if let Some(severity) = parse_or_warn(level) {
            self.severity = severity;
        }
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn callable_name(&self) -> &str {
        &self.callable_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn args(&self) -> &CapturedArgs {
        &self.args
    }

    pub fn outcome(&self) -> &CallOutcome {
        &self.outcome
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            CallOutcome::Returned(value) => Some(value),
            CallOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureInfo> {
        match &self.outcome {
            CallOutcome::Returned(_) => None,
            CallOutcome::Failed(info) => Some(info),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, CallOutcome::Failed(_))
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}
