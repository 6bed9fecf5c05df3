use sovran_any::{AnyError, FunctionRef};

fn square<T: std::ops::Mul<Output = T> + Copy>(n: T) -> T {
    n * n
}

struct Value {
    val: f64,
}

// Accepts any callable without taking ownership or boxing it
fn apply_twice(mut f: FunctionRef<'_, (i32,), i32>, n: i32) -> Result<i32, AnyError> {
    let once = f.call((n,))?;
    f.call((once,))
}

fn main() -> Result<(), AnyError> {
    // Closure
    let mut double = |n: i32| 2 * n;
    let mut mult = FunctionRef::new(&mut double);
    println!("2 * 2 = {}", mult.call((2,))?);

    // Stateful closure; the state lives in the closure, not the view
    let mut k = 1;
    let mut scaled = |n: i32| {
        let out = k * n;
        k += 1;
        out
    };
    mult.bind(&mut scaled);
    println!("1 * 3 = {}", mult.call((3,))?);
    println!("2 * 3 = {}", mult.call((3,))?);
    println!("k is now {}", k);

    // Function
    let mut sq = square::<f64>;
    let mut view = FunctionRef::new(&mut sq);
    println!("3 * 3 = {}", view.call((3.0,))?);

    // Field accessor
    let value = Value { val: 3.14 };
    let mut get = |v: &Value| v.val;
    let mut getter: FunctionRef<'_, (&Value,), f64> = FunctionRef::new(&mut get);
    println!("value: {}", getter.call((&value,))?);

    // Passing a view to a function
    let mut inc = |n: i32| n + 1;
    println!("apply_twice(inc, 5) = {}", apply_twice(FunctionRef::new(&mut inc), 5)?);

    Ok(())
}
