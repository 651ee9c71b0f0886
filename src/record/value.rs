use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

/// Подстановка для значений, которые не удалось превратить в строку
pub const UNREPRESENTABLE: &str = "<unrepresentable>";

/// Снимок значения аргумента или результата в момент вызова
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Opaque {
        type_name: String,
        repr: Option<String>,
    },
}

impl Value {
    /// Захватывает произвольное значение через его `Display`.
    /// Если форматирование вернуло ошибку, сохраняется `None`, а рендер подставит заглушку.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        let mut repr = String::new();
        let repr = match write!(repr, "{}", value) {
            Ok(()) => Some(repr),
            Err(_) => None,
        };
        Value::Opaque {
            type_name: natural_type_name(short_type_name::<T>()).to_string(),
            repr,
        }
    }

    /// То же, что [`Value::display`], но через `Debug`
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        let mut repr = String::new();
        let repr = match write!(repr, "{:?}", value) {
            Ok(()) => Some(repr),
            Err(_) => None,
        };
        Value::Opaque {
            type_name: natural_type_name(short_type_name::<T>()).to_string(),
            repr,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Opaque { type_name, .. } => type_name,
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Представление внутри коллекций и для строковых позиционных аргументов: строки в кавычках
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&item.repr())?;
                }
                f.write_str("]")
            }
            Value::Opaque { repr, .. } => f.write_str(repr.as_deref().unwrap_or(UNREPRESENTABLE)),
        }
    }
}

/// Последний сегмент пути типа: `alloc::string::String` -> `String`
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// Встроенные типы под теми же именами, что и у [`ToValue`]: `u32` -> `int`, `&str` -> `str`
fn natural_type_name(name: &str) -> &str {
    let bare = name.trim_start_matches('&').trim_start_matches("mut ");
    match bare {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
        | "usize" => "int",
        "f32" | "f64" => "float",
        "bool" => "bool",
        "str" | "String" | "char" => "str",
        "()" => "none",
        _ => bare,
    }
}

/// Преобразование в [`Value`] для записи в журнал
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_to_value {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

impl_to_value!(Int as i64: i8, i16, i32, i64, isize);
impl_to_value!(UInt as u64: u8, u16, u32, u64, usize);
impl_to_value!(Float as f64: f32, f64);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for Path {
    fn to_value(&self) -> Value {
        Value::Str(self.display().to_string())
    }
}

impl ToValue for PathBuf {
    fn to_value(&self) -> Value {
        self.as_path().to_value()
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::None
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::None,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_natural_representation() {
        assert_eq!(5i32.to_value().to_string(), "5");
        assert_eq!(1.0f64.to_value().to_string(), "1.0");
        assert_eq!("yogurt".to_value().to_string(), "yogurt");
        assert_eq!(().to_value().to_string(), "None");
        assert_eq!(vec!["a", "b"].to_value().to_string(), "[\"a\", \"b\"]");
        assert_eq!(Some(3u8).to_value().to_string(), "3");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(5i64.to_value().type_name(), "int");
        assert_eq!(7usize.to_value().type_name(), "int");
        assert_eq!(String::from("x").to_value().type_name(), "str");
        assert_eq!(Value::display(&std::net::Ipv4Addr::LOCALHOST).type_name(), "Ipv4Addr");
    }

    #[test]
    fn test_broken_display_falls_back_to_placeholder() {
        let value = Value::display(&Broken);
        assert_eq!(value.to_string(), UNREPRESENTABLE);
        assert_eq!(value.type_name(), "Broken");
    }

    #[test]
    fn test_debug_capture_uses_natural_names() {
        #[derive(Debug)]
        struct Bar {
            height: u32,
        }

        let bar = Bar { height: 24 };
        assert_eq!(Value::debug(&bar).type_name(), "Bar");
        assert_eq!(Value::debug(&&bar).type_name(), "Bar");
        assert_eq!(Value::debug(&bar).to_string(), "Bar { height: 24 }");
        assert_eq!(Value::debug(&6u32).type_name(), "int");
        assert_eq!(Value::debug(&"zsh").type_name(), "str");
        assert_eq!(Value::debug(&"zsh").to_string(), "\"zsh\"");
    }

    #[test]
    fn test_short_type_name_strips_generics_path() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<alloc::string::String>");
    }
}
