/// Вызов функции с аргументами, упакованными в кортеж.
///
/// Реализовано для любых `Fn` арности 0..=6, поэтому обёртка принимает
/// обычные функции, методы (`Type::method` с получателем первым аргументом)
/// и замыкания без изменения их сигнатуры.
pub trait Invoke<Args> {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;
}

impl<F, R> Invoke<()> for F
where
    F: Fn() -> R,
{
    type Output = R;

    fn invoke(&self, _args: ()) -> R {
        (self)()
    }
}

macro_rules! impl_invoke {
    ($($name:ident),+) => {
        impl<F, R, $($name),+> Invoke<($($name,)+)> for F
        where
            F: Fn($($name),+) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn invoke(&self, args: ($($name,)+)) -> R {
                let ($($name,)+) = args;
                (self)($($name),+)
            }
        }
    };
}

impl_invoke!(A1);
impl_invoke!(A1, A2);
impl_invoke!(A1, A2, A3);
impl_invoke!(A1, A2, A3, A4);
impl_invoke!(A1, A2, A3, A4, A5);
impl_invoke!(A1, A2, A3, A4, A5, A6);

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: i64, b: i64) -> i64 {
        a + b
    }

    #[test]
    fn test_invoke_arities() {
        assert_eq!(add.invoke((2, 3)), 5);
        assert_eq!((|| 7).invoke(()), 7);
        assert_eq!((|s: &str| s.len()).invoke(("abc",)), 3);
        assert_eq!((|a: u8, b: u8, c: u8, d: u8, e: u8, f: u8| a + b + c + d + e + f).invoke((1, 1, 1, 1, 1, 1)), 6);
    }
}
