//! # sovran-any
//!
//! Value-semantic type erasure for Rust.
//!
//! `sovran-any` provides small building blocks for storing and calling values
//! whose concrete type is only known at runtime, while keeping ordinary value
//! semantics: cloning a container deep-clones what it holds, taking from it
//! leaves it empty, and every assignment either fully succeeds or leaves the
//! target untouched.
//!
//! ## Key Features
//!
//! - **[`ErasedValue`]**: holds one value of any clonable type behind an opaque
//!   pointer and a per-type operation table
//! - **[`BoxedValue`]**: the same container, dispatching through a trait object
//! - **[`Function`]**: an owned, clonable callable of a fixed signature
//! - **[`FunctionRef`]**: a borrowed view over any callable of a fixed signature
//! - **Checked extraction**: values come back out only as exactly the type
//!   that went in, with [`AnyError::TypeMismatch`] otherwise
//!
//! ## Usage Examples
//!
//! ### Storing and Extracting Values
//!
//! ```rust
//! use sovran_any::{AnyError, ErasedValue, TypeIdentity};
//!
//! fn main() -> Result<(), AnyError> {
//!     let mut value = ErasedValue::new(3i32);
//!     assert_eq!(value.type_identity(), TypeIdentity::of::<i32>());
//!     assert_eq!(value.extract::<i32>()?, 3);
//!
//!     // Wrong types are rejected, never converted
//!     match value.extract::<i64>() {
//!         Ok(_) => unreachable!(),
//!         Err(AnyError::TypeMismatch { expected, found }) => {
//!             println!("wanted {}, holding {}", expected, found);
//!         }
//!         Err(e) => println!("Other error: {}", e),
//!     }
//!
//!     // Assignment deep-clones the source
//!     let hello = ErasedValue::new("Hello".to_string());
//!     value.assign(&hello);
//!     assert_eq!(value.extract::<String>()?, "Hello");
//!
//!     value.reset();
//!     assert!(!value.has_value());
//!     Ok(())
//! }
//! ```
//!
//! ### Moving Between Containers
//!
//! ```rust
//! use sovran_any::ErasedValue;
//!
//! let mut a = ErasedValue::new(3.14f64);
//! let b = a.take();
//!
//! assert!(!a.has_value());
//! assert_eq!(b.extract::<f64>().unwrap(), 3.14);
//! ```
//!
//! ### Wrapping Callables
//!
//! ```rust
//! use sovran_any::{AnyError, Function, FunctionRef};
//!
//! fn square(n: f64) -> f64 {
//!     n * n
//! }
//!
//! fn main() -> Result<(), AnyError> {
//!     // Owned
//!     let mut sq: Function<(f64,), f64> = Function::new(square);
//!     assert_eq!(sq.call((3.0,))?, 9.0);
//!
//!     // Borrowed
//!     let mut total = 0;
//!     let mut accumulate = |n: i32| total += n;
//!     let mut view = FunctionRef::new(&mut accumulate);
//!     view.call((2,))?;
//!     view.call((5,))?;
//!     assert_eq!(total, 7);
//!
//!     Ok(())
//! }
//! ```
#![deny(unsafe_op_in_unsafe_fn)]

mod any_value;
mod erased;
mod error;
mod function;
mod function_ref;
mod invoke;
mod type_identity;
mod vtable;

pub use any_value::{BoxedValue, CloneAny};
pub use erased::ErasedValue;
pub use error::AnyError;
pub use function::Function;
pub use function_ref::FunctionRef;
pub use invoke::Invoke;
pub use type_identity::TypeIdentity;
