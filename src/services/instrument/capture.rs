//! Режимы захвата: как обёртка превращает аргументы и результат в [`Value`].
//!
//! * [`Natural`] - через [`ArgList`] и [`Outcome`]: числа, строки, `Result` и `Named`.
//! * [`Debugged`] - любой `Debug`: собственные структуры, получатели `&self`,
//!   конструкторы, возвращающие `Self`. Результат всегда считается успехом.
//! * [`Fallible`] - как `Debugged`, но `Err` записывается как ошибка вызова.

use crate::record::value::short_type_name;
use crate::record::{ArgList, CallOutcome, CapturedArgs, DebugArgList, FailureInfo, Value};
use std::fmt;

use super::outcome::{display_or_placeholder, Outcome};

pub trait CaptureMode<A, O> {
    fn capture_args(args: &A) -> CapturedArgs;

    fn observe(output: &O) -> CallOutcome;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

#[derive(Debug, Clone, Copy, Default)]
pub struct Debugged;

#[derive(Debug, Clone, Copy, Default)]
pub struct Fallible;

impl<A: ArgList, O: Outcome> CaptureMode<A, O> for Natural {
    fn capture_args(args: &A) -> CapturedArgs {
        args.capture_all()
    }

    fn observe(output: &O) -> CallOutcome {
        output.observe()
    }
}

impl<A: DebugArgList, O: fmt::Debug> CaptureMode<A, O> for Debugged {
    fn capture_args(args: &A) -> CapturedArgs {
        args.capture_debug()
    }

    fn observe(output: &O) -> CallOutcome {
        CallOutcome::Returned(Value::debug(output))
    }
}

impl<A: DebugArgList, T: fmt::Debug, E: fmt::Display> CaptureMode<A, Result<T, E>> for Fallible {
    fn capture_args(args: &A) -> CapturedArgs {
        args.capture_debug()
    }

    fn observe(output: &Result<T, E>) -> CallOutcome {
        match output {
            Ok(value) => CallOutcome::Returned(Value::debug(value)),
            Err(error) => CallOutcome::Failed(FailureInfo::new(
                short_type_name::<E>(),
                display_or_placeholder(error),
            )),
        }
    }
}
