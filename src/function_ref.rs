//! A non-owning, type-erased view over a callable.
//!
//! [`FunctionRef`] stores an opaque pointer to a borrowed callable together
//! with a trampoline monomorphized for the callable's concrete type. The
//! borrow is tracked by the `'a` lifetime, so a view can never outlive the
//! callable it points to.

use crate::{AnyError, Invoke};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Opaque pointer to the callable and the trampoline built for its type.
///
/// # Safety Invariant
///
/// `callable` was created from a `&'a mut F` and `invoke` is
/// `trampoline::<F, Args, R>` for that same `F`.
struct Target<Args, R> {
    callable: NonNull<()>,
    invoke: unsafe fn(NonNull<()>, Args) -> R,
}

/// A borrowed callable with signature `Args -> R`
///
/// `Args` is a tuple of the argument types. Calling through the view invokes
/// the original callable, so state mutated by a closure persists in the
/// closure after the view is gone.
///
/// # Examples
///
/// ```
/// use sovran_any::{AnyError, FunctionRef};
///
/// let mut k = 1;
/// let mut scaled = |n: i32| {
///     let out = k * n;
///     k += 1;
///     out
/// };
///
/// let mut view = FunctionRef::new(&mut scaled);
/// assert_eq!(view.call((3,))?, 3);
/// assert_eq!(view.call((3,))?, 6);
///
/// view.reset();
/// assert_eq!(view.call((3,)), Err(AnyError::EmptyFunction));
/// # Ok::<(), AnyError>(())
/// ```
pub struct FunctionRef<'a, Args, R> {
    target: Option<Target<Args, R>>,
    _marker: PhantomData<&'a mut ()>,
}

impl<'a, Args, R> FunctionRef<'a, Args, R> {
    /// Creates a view with no target
    pub const fn empty() -> Self {
        Self {
            target: None,
            _marker: PhantomData,
        }
    }

    /// Creates a view over `callable`
    pub fn new<F>(callable: &'a mut F) -> Self
    where
        F: Invoke<Args, Output = R> + 'a,
    {
        Self {
            target: Some(Target {
                callable: NonNull::from(callable).cast::<()>(),
                invoke: trampoline::<F, Args, R>,
            }),
            _marker: PhantomData,
        }
    }

    /// Points the view at another callable
    pub fn bind<F>(&mut self, callable: &'a mut F)
    where
        F: Invoke<Args, Output = R> + 'a,
    {
        *self = Self::new(callable);
    }

    /// Returns true if the view has a target
    pub fn has_value(&self) -> bool {
        self.target.is_some()
    }

    /// Detaches the view from its target
    pub fn reset(&mut self) {
        self.target = None;
    }

    pub fn swap(&mut self, other: &mut FunctionRef<'a, Args, R>) {
        std::mem::swap(&mut self.target, &mut other.target);
    }

    /// Invokes the target with `args`
    ///
    /// # Errors
    ///
    /// Returns `AnyError::EmptyFunction` if the view has no target.
    pub fn call(&mut self, args: Args) -> Result<R, AnyError> {
        match &self.target {
            // SAFETY: By the invariant on `Target` the trampoline matches the
            // pointee, and the pointee is exclusively borrowed for `'a`, which
            // outlives `self`.
            Some(target) => Ok(unsafe { (target.invoke)(target.callable, args) }),
            None => {
                log::debug!("called an empty FunctionRef");
                Err(AnyError::EmptyFunction)
            }
        }
    }
}

/// # Safety
///
/// `callable` must have been created from a live `&mut F` that is not
/// otherwise accessed for the duration of the call.
unsafe fn trampoline<F, Args, R>(callable: NonNull<()>, args: Args) -> R
where
    F: Invoke<Args, Output = R>,
{
    // SAFETY: Guaranteed by the caller.
    let callable: &mut F = unsafe { callable.cast::<F>().as_mut() };
    callable.invoke(args)
}

impl<Args, R> Default for FunctionRef<'_, Args, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Args, R> fmt::Debug for FunctionRef<'_, Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRef")
            .field("bound", &self.has_value())
            .finish()
    }
}
