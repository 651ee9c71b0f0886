//! Instrumentation: обёртки, которые выполняют исходную функцию и пишут
//! ровно одну запись о вызове, не меняя ни результат, ни ошибку, ни панику.
//!
//! Порядок работы одного вызова:
//! снимок настроек -> фиксация аргументов -> выполнение ->
//! успех (уровень из снимка) или ошибка/паника (уровень `error`) ->
//! запись в sink, если логирование включено -> возврат исходного результата.

mod async_wrapper;
pub mod capture;
mod invoke;
mod logger;
mod outcome;
mod wrapper;

pub use self::async_wrapper::InstrumentedAsync;
pub use self::capture::{CaptureMode, Debugged, Fallible, Natural};
pub use self::invoke::Invoke;
pub use self::logger::{Logger, Settings};
pub use self::outcome::Outcome;
pub use self::wrapper::Instrumented;
