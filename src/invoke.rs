/// A callable that can be invoked with its arguments packed in a tuple
///
/// Implemented for every `FnMut` of up to eight arguments, so closures, fn
/// items and fn pointers can all be stored in [`Function`](crate::Function)
/// and viewed through [`FunctionRef`](crate::FunctionRef).
///
/// # Examples
///
/// ```
/// use sovran_any::Invoke;
///
/// let mut add = |a: i32, b: i32| a + b;
/// assert_eq!(add.invoke((4, 7)), 11);
/// ```
pub trait Invoke<Args> {
    type Output;

    fn invoke(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($ty:ident $arg:ident),*) => {
        impl<F, R, $($ty),*> Invoke<($($ty,)*)> for F
        where
            F: FnMut($($ty),*) -> R,
        {
            type Output = R;

            #[inline]
            fn invoke(&mut self, ($($arg,)*): ($($ty,)*)) -> R {
                self($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A1 a1);
impl_invoke!(A1 a1, A2 a2);
impl_invoke!(A1 a1, A2 a2, A3 a3);
impl_invoke!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_invoke!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_invoke!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_invoke!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_invoke!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);

#[cfg(test)]
mod tests {
    use super::*;

    fn square(n: f64) -> f64 {
        n * n
    }

    #[test]
    fn test_arities() {
        assert_eq!((|| 1).invoke(()), 1);
        assert_eq!(square.invoke((3.0,)), 9.0);
        assert_eq!((|a: u8, b: u8, c: u8| a + b + c).invoke((1, 2, 3)), 6);
        let mut eight = |a: i32, b: i32, c: i32, d: i32, e: i32, f: i32, g: i32, h: i32| {
            a + b + c + d + e + f + g + h
        };
        assert_eq!(eight.invoke((1, 1, 1, 1, 1, 1, 1, 1)), 8);
    }

    #[test]
    fn test_state_persists_between_calls() {
        let mut k = 1;
        let mut counter = move |n: i32| {
            let out = k * n;
            k += 1;
            out
        };
        assert_eq!(counter.invoke((3,)), 3);
        assert_eq!(counter.invoke((3,)), 6);
    }
}
