use sovran_any::{AnyError, BoxedValue, ErasedValue};

#[derive(Debug, Clone)]
struct Config {
    name: String,
    retries: u32,
}

fn main() -> Result<(), AnyError> {
    // Construct from a value
    let mut any = ErasedValue::new(3i32);
    println!("Holding {} = {}", any.type_name(), any.extract::<i32>()?);

    // Wrong types are rejected with a descriptive error
    match any.extract::<f64>() {
        Ok(value) => println!("This shouldn't happen: {}", value),
        Err(e) => println!("Correctly rejected: {}", e),
    }

    // Copy assignment deep-clones the source
    let hello = ErasedValue::new("Hello".to_string());
    any.assign(&hello);
    println!("After assign: {:?} = {}", any, any.extract::<String>()?);

    // Moving out leaves the source empty
    let moved = any.take();
    println!(
        "After take: source has value: {}, destination holds {}",
        any.has_value(),
        moved.type_name()
    );

    // Swap exchanges contents
    let mut a = ErasedValue::new("Hello".to_string());
    let mut b = ErasedValue::new(3u32);
    a.swap(&mut b);
    println!("Swapped: a = {}, b = {}", a.extract::<u32>()?, b.extract::<String>()?);

    // In-place modification
    let mut config = ErasedValue::new(Config {
        name: "primary".to_string(),
        retries: 3,
    });
    if let Some(config) = config.downcast_mut::<Config>() {
        config.retries += 1;
    }
    println!("Config: {:?}", config.extract::<Config>()?);

    // Reset returns the container to empty
    config.reset();
    match config.extract::<Config>() {
        Ok(_) => println!("This shouldn't happen - config should be gone"),
        Err(e) => println!("After reset: {}", e),
    }

    // The trait-object container behaves the same way
    let boxed = BoxedValue::new(vec![1, 2, 3]);
    let copy = boxed.clone();
    println!("Boxed copy: {:?}", copy.extract::<Vec<i32>>()?);

    Ok(())
}
