use crate::record::value::short_type_name;
use crate::record::{CallOutcome, FailureInfo, ToValue, Value};
use std::any::Any;
use std::fmt::{self, Write};
use std::path::PathBuf;

/// Как обёртка "видит" результат вызова, не забирая его у вызывающего
pub trait Outcome {
    fn observe(&self) -> CallOutcome;
}

impl<T: ToValue, E: fmt::Display> Outcome for Result<T, E> {
    fn observe(&self) -> CallOutcome {
        match self {
            Ok(value) => CallOutcome::Returned(value.to_value()),
            Err(error) => CallOutcome::Failed(FailureInfo::new(
                short_type_name::<E>(),
                display_or_placeholder(error),
            )),
        }
    }
}

macro_rules! impl_plain_outcome {
    ($($t:ty),*) => {
        $(
            impl Outcome for $t {
                fn observe(&self) -> CallOutcome {
                    CallOutcome::Returned(self.to_value())
                }
            }
        )*
    };
}

impl_plain_outcome!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String, PathBuf, (),
    Value
);

impl<T: ToValue> Outcome for Option<T> {
    fn observe(&self) -> CallOutcome {
        CallOutcome::Returned(self.to_value())
    }
}

impl<T: ToValue> Outcome for Vec<T> {
    fn observe(&self) -> CallOutcome {
        CallOutcome::Returned(self.to_value())
    }
}

impl Outcome for &'static str {
    fn observe(&self) -> CallOutcome {
        CallOutcome::Returned(self.to_value())
    }
}

// `to_string()` паникует на сломанном Display, поэтому пишем вручную
pub(crate) fn display_or_placeholder<E: fmt::Display + ?Sized>(error: &E) -> String {
    let mut message = String::new();
    match write!(message, "{}", error) {
        Ok(()) => message,
        Err(_) => crate::record::value::UNREPRESENTABLE.to_string(),
    }
}

/// Текст паники из payload, если это строка
pub(crate) fn panic_failure(payload: &(dyn Any + Send)) -> FailureInfo {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    };
    FailureInfo::new("panic", message)
}
