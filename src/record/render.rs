//! Рендер записи в одну строку журнала.
//!
//! Формат (порядок полей фиксирован, его разбирают внешние инструменты):
//!
//! ```text
//! <timestamp> | [<SEVERITY>] <Category> <<name>> <verb>: <name>(<args>) => <type> <<value>>
//! ```
//!
//! Для неудачного вызова возвращаемого значения нет, хвост строки
//! выглядит как `=> raised <<ErrorType>: <message>>`.

use super::args::CapturedArgs;
use super::invocation::{CallOutcome, InvocationRecord};
use chrono::SecondsFormat;
use std::fmt;

/// Рендер записи. Никогда не падает и не содержит переводов строк.
pub fn render(record: &InvocationRecord) -> String {
    let timestamp = record
        .timestamp()
        .to_rfc3339_opts(SecondsFormat::Micros, false);

    let tail = match record.outcome() {
        CallOutcome::Returned(value) => format!("{} <{}>", value.type_name(), value),
        CallOutcome::Failed(failure) => {
            format!("raised <{}: {}>", failure.type_name, failure.message)
        }
    };

    let line = format!(
        "{} | {} {} <{}> {}: {}({}) => {}",
        timestamp,
        record.severity().tag(),
        record.category(),
        record.callable_name(),
        record.category().interact_verb(),
        record.callable_name(),
        render_args(record.args()),
        tail,
    );

    escape_line_breaks(&line)
}

/// Позиционные аргументы (строки в кавычках), затем именованные как `name=value`
pub fn render_args(args: &CapturedArgs) -> String {
    let positional = args.positional().iter().map(|value| {
        if value.is_str() {
            value.repr()
        } else {
            value.to_string()
        }
    });
    let named = args
        .named()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value));

    positional.chain(named).collect::<Vec<_>>().join(", ")
}

fn escape_line_breaks(line: &str) -> String {
    if !line.contains(['\n', '\r']) {
        return line.to_string();
    }
    line.replace('\r', "\\r").replace('\n', "\\n")
}

impl fmt::Display for InvocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::args::{ArgList, Named};
    use crate::record::invocation::{Category, FailureInfo};
    use crate::record::severity::Severity;
    use crate::record::value::{ToValue, Value, UNREPRESENTABLE};
    use chrono::{Local, TimeZone};

    fn fixed_time() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2022, 9, 11, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_render_function_call() {
        let record = InvocationRecord::succeeded("add", Category::Function, (2, 3).capture_all(), 5i64.to_value(), Severity::Log)
            .with_timestamp(fixed_time());
        let line = render(&record);

        assert!(line.starts_with("2022-09-11T12:30:00.000000"));
        assert!(line.ends_with(" | [LOG] Function <add> called: add(2, 3) => int <5>"));
    }

    #[test]
    fn test_render_quotes_string_positional_only() {
        let record = InvocationRecord::succeeded(
            "spawn",
            Category::Function,
            ("alacritty", Named::new("shell", "zsh"), Named::new("detach", true)).capture_all(),
            Value::None,
            Severity::Info,
        );
        let line = record.to_string();

        assert!(line.contains("spawn(\"alacritty\", detach=true, shell=zsh)"));
        assert!(line.contains("=> none <None>"));
    }

    #[test]
    fn test_render_constructor_uses_instantiated() {
        let record = InvocationRecord::succeeded(
            "Bar",
            Category::Class,
            (24u32,).capture_all(),
            Value::display("Bar(24)"),
            Severity::Debug,
        );
        let line = render(&record);
        assert!(line.contains("[DEBUG] Class <Bar> instantiated: Bar(24) => str <Bar(24)>"));
    }

    #[test]
    fn test_render_failure_has_no_return_payload() {
        let record = InvocationRecord::failed(
            "boom",
            Category::Function,
            ().capture_all(),
            FailureInfo::new("ValueError", "x"),
        );
        let line = render(&record);

        assert!(line.contains("[ERROR] Function <boom> called: boom() => raised <ValueError: x>"));
        assert!(!line.contains("none <"));
    }

    #[test]
    fn test_render_never_contains_newlines() {
        let record = InvocationRecord::succeeded(
            "echo",
            Category::Method,
            ("line one\nline two",).capture_all(),
            "a\r\nb".to_value(),
            Severity::Info,
        );
        let line = render(&record);
        assert!(!line.contains('\n'));
        assert!(!line.contains('\r'));
        assert!(line.contains("=> str <a\\r\\nb>"));
    }

    #[test]
    fn test_render_placeholder_for_unrepresentable() {
        struct Broken;
        impl fmt::Display for Broken {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let record = InvocationRecord::succeeded(
            "make",
            Category::Function,
            (Value::display(&Broken),).capture_all(),
            Value::display(&Broken),
            Severity::Log,
        );
        let line = render(&record);
        assert!(line.contains(&format!("make({})", UNREPRESENTABLE)));
        assert!(line.ends_with(&format!("=> Broken <{}>", UNREPRESENTABLE)));
    }
}
