//! Operation table for [`ErasedValue`](crate::ErasedValue).
//!
//! The fields of [`ErasedVtable`] are private to this module and the only way
//! to obtain one is [`ErasedVtable::new`], which pairs every function pointer
//! with the same concrete type `T`. Callers that keep a vtable next to a
//! pointer created from `Box<T>` can therefore rely on the table always
//! matching the storage.

use crate::TypeIdentity;
use std::ptr::NonNull;

/// Function pointers for operating on a heap-allocated value whose type has
/// been erased.
///
/// # Safety Invariant
///
/// `clone` and `drop` point to the functions below instantiated with the type
/// `T` that `type_identity` reports.
pub(crate) struct ErasedVtable {
    type_identity: fn() -> TypeIdentity,
    clone: unsafe fn(NonNull<()>) -> NonNull<()>,
    drop: unsafe fn(NonNull<()>),
}

impl ErasedVtable {
    /// Returns the vtable for `T`. Repeated calls with the same `T` return the
    /// same `'static` instance.
    pub(crate) const fn new<T: Clone + Send + Sync + 'static>() -> &'static Self {
        const {
            &Self {
                type_identity: TypeIdentity::of::<T>,
                clone: clone::<T>,
                drop: drop::<T>,
            }
        }
    }

    #[inline]
    pub(crate) fn type_identity(&self) -> TypeIdentity {
        (self.type_identity)()
    }

    /// Allocates a clone of the value behind `ptr`.
    ///
    /// # Safety
    ///
    /// 1. `ptr` must come from `Box<T>::into_raw` and still be live.
    /// 2. This vtable must have been created for that same `T`.
    #[inline]
    pub(crate) unsafe fn clone(&self, ptr: NonNull<()>) -> NonNull<()> {
        // SAFETY: `self.clone` is `clone::<T>`, whose requirements are the same
        // as ours and are upheld by the caller.
        unsafe { (self.clone)(ptr) }
    }

    /// Drops the `Box<T>` behind `ptr`.
    ///
    /// # Safety
    ///
    /// 1. `ptr` must come from `Box<T>::into_raw` and still be live.
    /// 2. This vtable must have been created for that same `T`.
    /// 3. Ownership is transferred; `ptr` must not be used afterwards.
    #[inline]
    pub(crate) unsafe fn drop(&self, ptr: NonNull<()>) {
        // SAFETY: `self.drop` is `drop::<T>`, guaranteed by the caller.
        unsafe { (self.drop)(ptr) }
    }
}

/// Moves `value` to the heap and erases its type.
pub(crate) fn into_raw<T>(value: T) -> NonNull<()> {
    let ptr: *mut T = Box::into_raw(Box::new(value));
    // SAFETY: `Box::into_raw` never returns null.
    unsafe { NonNull::new_unchecked(ptr.cast::<()>()) }
}

/// # Safety
///
/// `ptr` must come from `Box<T>::into_raw` and still be live.
unsafe fn clone<T: Clone>(ptr: NonNull<()>) -> NonNull<()> {
    // SAFETY: The pointee is a live `T`, guaranteed by the caller.
    let value: &T = unsafe { ptr.cast::<T>().as_ref() };
    into_raw(value.clone())
}

/// # Safety
///
/// `ptr` must come from `Box<T>::into_raw`, still be live, and not be used
/// after this call.
unsafe fn drop<T>(ptr: NonNull<()>) {
    // SAFETY: Provenance and ownership are guaranteed by the caller.
    let boxed: Box<T> = unsafe { Box::from_raw(ptr.cast::<T>().as_ptr()) };
    std::mem::drop(boxed);
}
