use crate::config::{Config, RecorderConfig};
use crate::debug_if_enabled;
use crate::error::Result;
use crate::record::severity::parse_or_warn;
use crate::record::{CallOutcome, CapturedArgs, InvocationRecord, Severity};
use crate::services::classifier::{CallableInfo, Shape};
use crate::services::sink::{create_sink, RecordSink};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::async_wrapper::InstrumentedAsync;
use super::capture::Debugged;
use super::wrapper::Instrumented;

/// Настройки логгера. Каждый вызов берёт копию один раз и работает только с ней.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub severity: Severity,
    pub enabled: bool,
    pub persist_success: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            severity: Severity::Log,
            enabled: true,
            persist_success: true,
        }
    }
}

impl From<&RecorderConfig> for Settings {
    fn from(config: &RecorderConfig) -> Self {
        Self {
            severity: config.severity(),
            enabled: config.enabled,
            persist_success: config.persist_success,
        }
    }
}

/// Общий на процесс логгер вызовов. Клонирование дешёвое: настройки и sink общие.
#[derive(Clone)]
pub struct Logger {
    settings: Arc<RwLock<Settings>>,
    sink: Arc<dyn RecordSink>,
}

impl Logger {
    pub fn new(sink: Arc<dyn RecordSink>, settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            sink,
        }
    }

    pub fn from_config(config: &RecorderConfig, dry_run: bool) -> Self {
        let settings = Settings::from(config);
        info!(
            "Инициализация Logger (severity: {}, enabled: {}, persist_success: {}, dry_run: {})",
            settings.severity, settings.enabled, settings.persist_success, dry_run
        );
        Self::new(create_sink(config, dry_run), settings)
    }

    /// Загружает конфигурацию из TOML (+ переменные окружения `FUNCLOG_`) и строит логгер
    pub fn from_config_file<P: AsRef<Path>>(path: P, dry_run: bool) -> Result<Self> {
        let config = Config::load(path)?;
        Ok(Self::from_config(&config.recorder, dry_run))
    }

    /// Копия настроек для одного вызова
    pub fn snapshot(&self) -> Settings {
        *self.settings.read()
    }

    pub fn severity(&self) -> Severity {
        self.settings.read().severity
    }

    /// Меняет уровень по строке. Неизвестное значение: предупреждение, уровень прежний.
    pub fn set_level(&self, level: &str) -> &Self {
        if let Some(severity) = parse_or_warn(level) {
            self.set_severity(severity);
        }
        self
    }

    pub fn set_severity(&self, severity: Severity) -> &Self {
        self.settings.write().severity = severity;
        self
    }

    pub fn set_enabled(&self, enabled: bool) -> &Self {
        self.settings.write().enabled = enabled;
        self
    }

    pub fn set_persist_success(&self, persist_success: bool) -> &Self {
        self.settings.write().persist_success = persist_success;
        self
    }

    /// Оборачивает функцию; имя и форма выводятся из её типа
    pub fn instrument<F>(&self, func: F) -> Instrumented<F> {
        self.instrument_as(CallableInfo::of::<F>(), func)
    }

    /// Как [`Logger::instrument`], но с явным именем (для замыканий)
    pub fn instrument_named<F>(&self, name: impl Into<String>, func: F) -> Instrumented<F> {
        self.instrument_as(CallableInfo::new(name, Shape::of::<F>()), func)
    }

    /// Метод с получателем первым аргументом: `instrument_method("grow", Bar::grow)`.
    /// Аргументы и результат фиксируются через `Debug`.
    pub fn instrument_method<F>(&self, name: impl Into<String>, func: F) -> Instrumented<F, Debugged> {
        self.instrument_as(CallableInfo::new(name, Shape::BoundMethod), func)
            .debugged()
    }

    /// Конструктор, возвращающий `Self`. Для `Result<Self, E>` используйте `.fallible()`.
    pub fn instrument_constructor<F>(&self, name: impl Into<String>, func: F) -> Instrumented<F, Debugged> {
        self.instrument_as(CallableInfo::new(name, Shape::Constructor), func)
            .debugged()
    }

    pub fn instrument_as<F>(&self, info: CallableInfo, func: F) -> Instrumented<F> {
        debug_if_enabled!("Обёрнут {} <{}>", info.category(), info.name());
        Instrumented::new(self.clone(), info, func)
    }

    /// Обёртка для функций, возвращающих future
    pub fn instrument_async<F>(&self, name: impl Into<String>, func: F) -> InstrumentedAsync<F> {
        let info = CallableInfo::new(name, Shape::of::<F>());
        debug_if_enabled!("Обёрнут async {} <{}>", info.category(), info.name());
        InstrumentedAsync::new(self.clone(), info, func)
    }

    /// Строит запись по итогу вызова и отдаёт её в sink.
    /// Ошибки записи не выходят наружу: только предупреждение и зеркальный поток.
    pub(crate) fn finalize(
        &self,
        settings: &Settings,
        info: &CallableInfo,
        args: CapturedArgs,
        outcome: CallOutcome,
    ) {
        if !settings.enabled {
            return;
        }

        let (record, persist) = match outcome {
            CallOutcome::Returned(value) => (
                InvocationRecord::succeeded(info.name(), info.category(), args, value, settings.severity),
                settings.persist_success,
            ),
            CallOutcome::Failed(failure) => (
                InvocationRecord::failed(info.name(), info.category(), args, failure),
                true,
            ),
        };

        if !persist {
            debug_if_enabled!("Успешный вызов <{}> не сохраняется (persist_success = false)", info.name());
            self.sink.mirror(&record);
            return;
        }

        if let Err(e) = self.sink.append(&record) {
            warn!("Не удалось записать вызов <{}> в журнал: {}", info.name(), e);
            self.sink.report_failure(&e);
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.snapshot())
            .finish_non_exhaustive()
    }
}
