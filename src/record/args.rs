use super::value::{ToValue, Value};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Аргументы одного вызова, захваченные до начала выполнения
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedArgs {
    positional: SmallVec<[Value; 4]>,
    named: BTreeMap<String, Value>,
}

impl CapturedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_positional(&mut self, value: Value) {
        self.positional.push(value);
    }

    /// Имена уникальны: повторное имя заменяет прежнее значение
    pub fn insert_named(&mut self, name: impl Into<String>, value: Value) {
        self.named.insert(name.into(), value);
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Один аргумент вызова. Обычные значения попадают в позиционные,
/// [`Named`] и пользовательские структуры могут добавлять именованные.
pub trait Arg {
    fn capture(&self, args: &mut CapturedArgs);
}

/// Именованный аргумент: рендерится как `name=value`
#[derive(Debug, Clone, PartialEq)]
pub struct Named<T> {
    pub name: &'static str,
    pub value: T,
}

impl<T> Named<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: ToValue> Arg for Named<T> {
    fn capture(&self, args: &mut CapturedArgs) {
        args.insert_named(self.name, self.value.to_value());
    }
}

macro_rules! impl_positional_arg {
    ($($t:ty),*) => {
        $(
            impl Arg for $t {
                fn capture(&self, args: &mut CapturedArgs) {
                    args.push_positional(self.to_value());
                }
            }
        )*
    };
}

impl_positional_arg!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, str, String, Path,
    PathBuf, (), Value
);

impl<T: ToValue> Arg for Option<T> {
    fn capture(&self, args: &mut CapturedArgs) {
        args.push_positional(self.to_value());
    }
}

impl<T: ToValue> Arg for [T] {
    fn capture(&self, args: &mut CapturedArgs) {
        args.push_positional(self.to_value());
    }
}

impl<T: ToValue> Arg for Vec<T> {
    fn capture(&self, args: &mut CapturedArgs) {
        args.push_positional(self.to_value());
    }
}

impl<T: Arg + ?Sized> Arg for &T {
    fn capture(&self, args: &mut CapturedArgs) {
        (**self).capture(args)
    }
}

/// Набор аргументов, передаваемый обёрнутой функции целиком (кортеж)
pub trait ArgList {
    fn capture_all(&self) -> CapturedArgs;
}

impl ArgList for () {
    fn capture_all(&self) -> CapturedArgs {
        CapturedArgs::new()
    }
}

macro_rules! impl_arg_list {
    ($($name:ident),+) => {
        impl<$($name: Arg),+> ArgList for ($($name,)+) {
            #[allow(non_snake_case)]
            fn capture_all(&self) -> CapturedArgs {
                let ($($name,)+) = self;
                let mut args = CapturedArgs::new();
                $( $name.capture(&mut args); )+
                args
            }
        }
    };
}

impl_arg_list!(A1);
impl_arg_list!(A1, A2);
impl_arg_list!(A1, A2, A3);
impl_arg_list!(A1, A2, A3, A4);
impl_arg_list!(A1, A2, A3, A4, A5);
impl_arg_list!(A1, A2, A3, A4, A5, A6);

/// Набор аргументов, каждый из которых фиксируется через `Debug`.
/// Подходит для получателей (`&self`) и пользовательских структур без [`Arg`].
pub trait DebugArgList {
    fn capture_debug(&self) -> CapturedArgs;
}

impl DebugArgList for () {
    fn capture_debug(&self) -> CapturedArgs {
        CapturedArgs::new()
    }
}

macro_rules! impl_debug_arg_list {
    ($($name:ident),+) => {
        impl<$($name: fmt::Debug),+> DebugArgList for ($($name,)+) {
            #[allow(non_snake_case)]
            fn capture_debug(&self) -> CapturedArgs {
                let ($($name,)+) = self;
                let mut args = CapturedArgs::new();
                $( args.push_positional(Value::debug($name)); )+
                args
            }
        }
    };
}

impl_debug_arg_list!(A1);
impl_debug_arg_list!(A1, A2);
impl_debug_arg_list!(A1, A2, A3);
impl_debug_arg_list!(A1, A2, A3, A4);
impl_debug_arg_list!(A1, A2, A3, A4, A5);
impl_debug_arg_list!(A1, A2, A3, A4, A5, A6);
