//! Classifier: определяет категорию обёрнутого объекта, не вызывая его.
//!
//! Таблица из двух упорядоченных групп форм строится один раз.
//! Сначала проверяется группа "функций", затем группа "методов";
//! первая совпавшая группа определяет категорию. Всё остальное считается
//! конструктором (`Category::Class`).

use crate::record::Category;
use once_cell::sync::Lazy;

/// Форма вызываемого объекта, как её видно на стороне обёртки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    PlainFunction,
    BuiltinFunction,
    Lambda,
    BoundMethod,
    BuiltinMethod,
    MethodDescriptor,
    Constructor,
    Opaque,
}

const FUNCTION_SHAPES: &[Shape] = &[Shape::PlainFunction, Shape::BuiltinFunction, Shape::Lambda];
const METHOD_SHAPES: &[Shape] = &[Shape::BoundMethod, Shape::BuiltinMethod, Shape::MethodDescriptor];

/// Порядок групп важен: функции проверяются раньше методов
static CLASSIFICATION_TABLE: Lazy<Vec<(Category, &'static [Shape])>> = Lazy::new(|| {
    vec![
        (Category::Function, FUNCTION_SHAPES),
        (Category::Method, METHOD_SHAPES),
    ]
});

/// Категория по форме. Ничего не совпало -> `Class`.
pub fn classify(shape: Shape) -> Category {
    CLASSIFICATION_TABLE
        .iter()
        .find(|(_, shapes)| shapes.contains(&shape))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Class)
}

impl Shape {
    /// Выводит форму из имени типа: замыкания -> `Lambda`,
    /// указатели на функции и `dyn Fn` -> `BuiltinFunction`, fn-items -> `PlainFunction`.
    pub fn of<F: ?Sized>() -> Shape {
        Self::from_type_name(std::any::type_name::<F>())
    }

    fn from_type_name(type_name: &str) -> Shape {
        if type_name.contains("{{closure}}") {
            Shape::Lambda
        } else if is_erased_callable(type_name) {
            Shape::BuiltinFunction
        } else {
            Shape::PlainFunction
        }
    }
}

fn is_erased_callable(type_name: &str) -> bool {
    let trimmed = type_name.trim_start_matches('&');
    trimmed.starts_with("fn(")
        || trimmed.starts_with("unsafe fn(")
        || trimmed.starts_with("extern ")
        || trimmed.starts_with("dyn ")
        || trimmed.contains("<dyn ")
}

/// Идентичность обёрнутого объекта: имя и категория, вычисленные при обёртывании
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableInfo {
    name: String,
    shape: Shape,
    category: Category,
}

impl CallableInfo {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            category: classify(shape),
        }
    }

    /// Имя и форма выводятся из типа `F`
    pub fn of<F: ?Sized>() -> Self {
        let shape = Shape::of::<F>();
        Self::new(declared_name(std::any::type_name::<F>(), shape), shape)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Объявленное имя функции: последний сегмент пути без generic-параметров
fn declared_name(type_name: &str, shape: Shape) -> String {
    match shape {
        Shape::Lambda => "<lambda>".to_string(),
        Shape::BuiltinFunction => "<builtin>".to_string(),
        _ => {
            let head = type_name.split('<').next().unwrap_or(type_name);
            head.rsplit("::").next().unwrap_or(head).to_string()
        }
    }
}
