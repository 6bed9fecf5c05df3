use sovran_any::{AnyError, Function};

fn square<T: std::ops::Mul<Output = T> + Copy>(n: T) -> T {
    n * n
}

#[derive(Clone, Default)]
struct Add;

impl Add {
    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        lhs + rhs
    }
}

struct Value {
    val: f64,
}

fn main() -> Result<(), AnyError> {
    // Closure
    let mut mult = Function::new(|n: i32| 2 * n);
    println!("2 * 2 = {}", mult.call((2,))?);

    // Stateful closure
    let mut k = 1;
    mult.set(move |n: i32| {
        let out = k * n;
        k += 1;
        out
    });
    println!("1 * 3 = {}", mult.call((3,))?);
    println!("2 * 3 = {}", mult.call((3,))?);

    // Clones carry their own copy of the captured state
    let mut copy = mult.clone();
    println!("3 * 3 = {} (original)", mult.call((3,))?);
    println!("3 * 3 = {} (copy)", copy.call((3,))?);

    // Function
    let mut sq: Function<(f64,), f64> = Function::new(square::<f64>);
    println!("3 * 3 = {}", sq.call((3.0,))?);

    // Functor
    let add = Add;
    let mut adder = Function::new(move |lhs: f64, rhs: i32| add.apply(lhs, f64::from(rhs)));
    println!("4 + 7 = {}", adder.call((4.0, 7))?);

    // Field accessor
    let value = Value { val: 3.14 };
    let mut getter: Function<(&Value,), f64> = Function::new(|v: &Value| v.val);
    println!("value: {}", getter.call((&value,))?);

    // Empty functions report an error instead of crashing
    mult.reset();
    match mult.call((1,)) {
        Ok(_) => println!("This shouldn't happen"),
        Err(e) => println!("Empty function: {}", e),
    }

    Ok(())
}
