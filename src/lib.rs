//! Логгер вызовов: оборачивает функцию, метод или конструктор, выполняет её
//! без изменения семантики и дописывает в журнал одну строку на каждый вызов.
//!
//! ```no_run
//! use funclog::{Logger, Settings};
//! use funclog::services::sink::FileSink;
//! use std::sync::Arc;
//!
//! fn add(a: i64, b: i64) -> i64 {
//!     a + b
//! }
//!
//! let logger = Logger::new(Arc::new(FileSink::new("calls.log".into(), None)), Settings::default());
//! let add = logger.instrument(add);
//! assert_eq!(add.call((2, 3)), 5);
//! // calls.log: "... | [LOG] Function <add> called: add(2, 3) => int <5>"
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod record;
pub mod services;
mod utils;

pub use config::Config;
pub use error::{FuncLogError, Result};
pub use record::{Category, InvocationRecord, Named, Severity, Value};
pub use services::{Instrumented, InstrumentedAsync, Logger, Settings};
