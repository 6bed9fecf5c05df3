use sovran_any::{AnyError, Function, FunctionRef, Invoke};
use std::panic::{self, AssertUnwindSafe};

fn square<T: std::ops::Mul<Output = T> + Copy>(n: T) -> T {
    n * n
}

// Callable object with its own state, standing in for a hand-written functor
#[derive(Clone)]
struct Counter {
    step: i32,
    total: i32,
}

impl Counter {
    fn into_fn(mut self) -> impl FnMut() -> i32 + Clone {
        move || {
            self.total += self.step;
            self.total
        }
    }
}

struct Value {
    val: f64,
}

#[test]
fn test_function_basic_operations() -> Result<(), AnyError> {
    let mut mult = Function::new(|n: i32| 2 * n);
    assert!(mult.has_value());
    assert_eq!(mult.call((2,))?, 4);

    let mut k = 1;
    mult.set(move |n: i32| {
        let out = k * n;
        k += 1;
        out
    });
    assert_eq!(mult.call((3,))?, 3);
    assert_eq!(mult.call((3,))?, 6);

    let mut sq: Function<(f64,), f64> = Function::new(square::<f64>);
    assert_eq!(sq.call((3.0,))?, 9.0);

    let mut adder = Function::new(|lhs: f64, rhs: i32| lhs + f64::from(rhs));
    assert_eq!(adder.call((4.0, 7))?, 11.0);

    let value = Value { val: 3.14 };
    let mut getter: Function<(&Value,), f64> = Function::new(|v: &Value| v.val);
    assert_eq!(getter.call((&value,))?, 3.14);

    Ok(())
}

#[test]
fn test_function_clone_has_independent_state() -> Result<(), AnyError> {
    let mut a = Function::new(Counter { step: 2, total: 0 }.into_fn());
    assert_eq!(a.call(())?, 2);

    let mut b = a.clone();
    assert_eq!(a.call(())?, 4);
    assert_eq!(a.call(())?, 6);
    assert_eq!(b.call(())?, 4);
    Ok(())
}

#[test]
fn test_function_value_semantics() -> Result<(), AnyError> {
    let mut a = Function::new(|| "a");
    let mut b = Function::new(|| "b");

    a.swap(&mut b);
    assert_eq!(a.call(())?, "b");
    assert_eq!(b.call(())?, "a");

    a.assign(&b);
    assert_eq!(a.call(())?, "a");
    assert_eq!(b.call(())?, "a");

    let mut c = b.take();
    assert!(!b.has_value());
    assert_eq!(c.call(())?, "a");

    a.reset();
    assert!(!a.has_value());
    assert_eq!(a.call(()), Err(AnyError::EmptyFunction));
    Ok(())
}

#[derive(Debug)]
struct ExplosiveFn;

impl Clone for ExplosiveFn {
    fn clone(&self) -> Self {
        panic!("clone failed");
    }
}

#[test]
fn test_function_panicking_clone_leaves_target_untouched() {
    let explosive = ExplosiveFn;
    let source: Function<(), i32> = Function::new(move || {
        let _keep = &explosive;
        0
    });
    let mut target: Function<(), i32> = Function::new(|| 1);

    let result = panic::catch_unwind(AssertUnwindSafe(|| target.assign(&source)));
    assert!(result.is_err());
    assert_eq!(target.call(()).unwrap(), 1);
}

#[test]
fn test_function_ref_basic_operations() -> Result<(), AnyError> {
    let mut double = |n: i32| 2 * n;
    let mut view = FunctionRef::new(&mut double);
    assert!(view.has_value());
    assert_eq!(view.call((2,))?, 4);

    let mut k = 1;
    let mut scaled = |n: i32| {
        let out = k * n;
        k += 1;
        out
    };
    view.bind(&mut scaled);
    assert_eq!(view.call((3,))?, 3);
    assert_eq!(view.call((3,))?, 6);
    assert_eq!(k, 3);

    let mut sq = square::<f64>;
    let mut view = FunctionRef::new(&mut sq);
    assert_eq!(view.call((3.0,))?, 9.0);

    let mut getter = |v: &Value| v.val;
    let value = Value { val: 3.14 };
    let mut view: FunctionRef<'_, (&Value,), f64> = FunctionRef::new(&mut getter);
    assert_eq!(view.call((&value,))?, 3.14);

    Ok(())
}

#[test]
fn test_function_ref_over_function() -> Result<(), AnyError> {
    // A view can borrow an owned `Function` through a closure
    let mut owned = Function::new(Counter { step: 5, total: 0 }.into_fn());
    let mut forward = || owned.call(()).unwrap_or_default();
    let mut view = FunctionRef::new(&mut forward);
    assert_eq!(view.call(())?, 5);
    assert_eq!(view.call(())?, 10);
    drop(view);
    assert_eq!(owned.call(())?, 15);
    Ok(())
}

#[test]
fn test_function_ref_empty() {
    let mut view: FunctionRef<'_, (), ()> = FunctionRef::empty();
    assert!(!view.has_value());
    assert_eq!(view.call(()), Err(AnyError::EmptyFunction));
    assert!(format!("{:?}", view).contains("bound: false"));
}

#[test]
fn test_invoke_is_implemented_for_fn_pointers() {
    let mut f: fn(u8) -> u8 = |n| n + 1;
    assert_eq!(f.invoke((1,)), 2);
}

#[test]
fn test_thread_safety_markers() {
    static_assertions::assert_impl_all!(Function<(i32,), i32>: Clone, Default);
    static_assertions::assert_not_impl_any!(FunctionRef<'static, (i32,), i32>: Send, Sync);
}
