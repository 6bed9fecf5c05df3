use crate::{AnyError, Invoke};
use std::fmt;

/// An owned callable that can be invoked and cloned without knowing its
/// concrete type.
trait FunctionImpl<Args, R> {
    fn invoke(&mut self, args: Args) -> R;

    fn clone_box(&self) -> Box<dyn FunctionImpl<Args, R>>;
}

impl<F, Args, R> FunctionImpl<Args, R> for F
where
    F: Invoke<Args, Output = R> + Clone + 'static,
{
    fn invoke(&mut self, args: Args) -> R {
        Invoke::invoke(self, args)
    }

    fn clone_box(&self) -> Box<dyn FunctionImpl<Args, R>> {
        Box::new(self.clone())
    }
}

/// An owned, clonable callable with signature `Args -> R`
///
/// `Function` takes ownership of any clonable closure, fn item or fn pointer.
/// Cloning a `Function` clones the stored callable together with its captured
/// state, so each copy evolves independently.
///
/// # Examples
///
/// ```
/// use sovran_any::{AnyError, Function};
///
/// let mut mult = Function::new(|n: i32| 2 * n);
/// assert_eq!(mult.call((2,))?, 4);
///
/// let mut k = 1;
/// mult.set(move |n: i32| {
///     let out = k * n;
///     k += 1;
///     out
/// });
/// assert_eq!(mult.call((3,))?, 3);
///
/// let mut copy = mult.clone();
/// assert_eq!(mult.call((3,))?, 6);
/// assert_eq!(copy.call((3,))?, 6);
/// # Ok::<(), AnyError>(())
/// ```
pub struct Function<Args, R> {
    target: Option<Box<dyn FunctionImpl<Args, R>>>,
}

impl<Args, R> Function<Args, R> {
    /// Creates a function with no target
    pub const fn empty() -> Self {
        Self { target: None }
    }

    /// Takes ownership of `callable`
    pub fn new<F>(callable: F) -> Self
    where
        F: Invoke<Args, Output = R> + Clone + 'static,
    {
        Self {
            target: Some(Box::new(callable)),
        }
    }

    /// Replaces the target with `callable`
    pub fn set<F>(&mut self, callable: F)
    where
        F: Invoke<Args, Output = R> + Clone + 'static,
    {
        self.assign_from(Self::new(callable));
    }

    /// Returns true if the function has a target
    pub fn has_value(&self) -> bool {
        self.target.is_some()
    }

    pub fn reset(&mut self) {
        self.target = None;
    }

    pub fn swap(&mut self, other: &mut Function<Args, R>) {
        std::mem::swap(&mut self.target, &mut other.target);
    }

    /// Moves the target out, leaving `self` empty
    pub fn take(&mut self) -> Function<Args, R> {
        Function {
            target: self.target.take(),
        }
    }

    /// Replaces the target with a clone of the one in `source`
    ///
    /// If cloning panics, `self` keeps its previous target.
    pub fn assign(&mut self, source: &Function<Args, R>) {
        let mut temp = source.clone();
        self.swap(&mut temp);
    }

    /// Replaces the target with the one in `source`
    pub fn assign_from(&mut self, mut source: Function<Args, R>) {
        self.swap(&mut source);
    }

    /// Invokes the target with `args`
    ///
    /// # Errors
    ///
    /// Returns `AnyError::EmptyFunction` if there is no target.
    pub fn call(&mut self, args: Args) -> Result<R, AnyError> {
        match self.target.as_mut() {
            Some(target) => Ok(FunctionImpl::invoke(&mut **target, args)),
            None => {
                log::debug!("called an empty Function");
                Err(AnyError::EmptyFunction)
            }
        }
    }
}

impl<Args, R> Clone for Function<Args, R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.as_ref().map(|target| (**target).clone_box()),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<Args, R> Default for Function<Args, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Args, R> fmt::Debug for Function<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("bound", &self.has_value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(n: f64) -> f64 {
        n * n
    }

    #[derive(Clone)]
    struct Add;

    impl Add {
        fn apply(&self, lhs: f64, rhs: i32) -> f64 {
            lhs + f64::from(rhs)
        }
    }

    #[test]
    fn test_fn_item_and_functor() {
        let mut sq = Function::new(square);
        assert_eq!(sq.call((3.0,)).unwrap(), 9.0);

        let add = Add;
        let mut adder = Function::new(move |lhs: f64, rhs: i32| add.apply(lhs, rhs));
        assert_eq!(adder.call((4.0, 7)).unwrap(), 11.0);
    }

    #[test]
    fn test_empty_function() {
        let mut f: Function<(), ()> = Function::default();
        assert!(!f.has_value());
        assert_eq!(f.call(()), Err(AnyError::EmptyFunction));
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut a = Function::new(|| "hi");
        let mut b = a.take();
        assert!(!a.has_value());
        assert_eq!(b.call(()).unwrap(), "hi");
    }

    #[test]
    fn test_set_replaces_target() {
        let mut f = Function::new(|n: u32| n + 1);
        f.set(|n: u32| n * 10);
        assert_eq!(f.call((4,)).unwrap(), 40);
    }
}
