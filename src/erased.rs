//! A value-semantic container for a single value of any clonable type.
//!
//! The value lives behind an opaque pointer next to an [`ErasedVtable`] that
//! was built for its concrete type when the container was created. Both are
//! stored in one [`Raw`] inside an `Option`, so a container either holds a
//! pointer together with its matching vtable or nothing at all.

use crate::vtable::{into_raw, ErasedVtable};
use crate::{AnyError, TypeIdentity};
use std::fmt;
use std::ptr::NonNull;

/// Pointer plus the vtable that was created for its pointee.
///
/// # Safety Invariant
///
/// `ptr` comes from `Box<T>::into_raw`, is uniquely owned by the enclosing
/// [`ErasedValue`] and `vtable` was created by `ErasedVtable::new::<T>()` for
/// the same `T`.
struct Raw {
    ptr: NonNull<()>,
    vtable: &'static ErasedVtable,
}

/// A container holding at most one value of an arbitrary type
///
/// `ErasedValue` forgets the static type of the value it holds but keeps
/// enough information to clone it, drop it and check its type at runtime.
/// Cloning the container deep-clones the held value.
///
/// # Examples
///
/// ```
/// use sovran_any::{AnyError, ErasedValue};
///
/// let mut value = ErasedValue::new(3i32);
/// assert!(value.has_value());
/// assert_eq!(value.extract::<i32>()?, 3);
/// assert!(value.extract::<f64>().is_err());
///
/// let hello = ErasedValue::new(String::from("Hello"));
/// value.assign(&hello);
/// assert_eq!(value.extract::<String>()?, "Hello");
///
/// value.reset();
/// assert!(!value.has_value());
/// # Ok::<(), AnyError>(())
/// ```
pub struct ErasedValue {
    raw: Option<Raw>,
}

// SAFETY: `ErasedValue::new` only accepts `Send + Sync` types and the pointer
// is never shared outside the container.
unsafe impl Send for ErasedValue {}
// SAFETY: See above; shared access only hands out `&T`.
unsafe impl Sync for ErasedValue {}

impl ErasedValue {
    /// Creates an empty container. Does not allocate.
    pub const fn new_empty() -> Self {
        Self { raw: None }
    }

    /// Moves `value` to the heap and wraps it
    pub fn new<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self {
            raw: Some(Raw {
                ptr: into_raw(value),
                vtable: ErasedVtable::new::<T>(),
            }),
        }
    }

    /// Returns true if the container holds a value
    pub fn has_value(&self) -> bool {
        self.raw.is_some()
    }

    /// Returns the identity of the held type, or [`TypeIdentity::none()`] when empty
    pub fn type_identity(&self) -> TypeIdentity {
        match &self.raw {
            Some(raw) => raw.vtable.type_identity(),
            None => TypeIdentity::none(),
        }
    }

    /// Returns the name of the held type
    pub fn type_name(&self) -> &'static str {
        self.type_identity().name()
    }

    /// Check if the held value is exactly of type T
    pub fn is<T: 'static>(&self) -> bool {
        self.type_identity().is::<T>()
    }

    /// Drops the held value, leaving the container empty
    pub fn reset(&mut self) {
        self.raw = None;
    }

    /// Exchanges the contents of two containers without allocating
    pub fn swap(&mut self, other: &mut ErasedValue) {
        std::mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Moves the contents out, leaving `self` empty
    pub fn take(&mut self) -> ErasedValue {
        let mut taken = ErasedValue::new_empty();
        self.swap(&mut taken);
        taken
    }

    /// Replaces the contents with a deep clone of `source`
    ///
    /// If cloning panics, `self` keeps its previous contents.
    pub fn assign(&mut self, source: &ErasedValue) {
        let mut temp = source.clone();
        self.swap(&mut temp);
    }

    /// Replaces the contents with those of `source`
    pub fn assign_from(&mut self, mut source: ErasedValue) {
        self.swap(&mut source);
    }

    /// Returns a clone of the held value
    ///
    /// # Errors
    ///
    /// Returns `AnyError::TypeMismatch` if the container is empty or holds a
    /// type other than exactly `T`.
    pub fn extract<T: Clone + 'static>(&self) -> Result<T, AnyError> {
        self.downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| AnyError::mismatch::<T>(self.type_identity()))
    }

    /// Get a reference to the held value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        let raw = self.raw.as_ref()?;
        if !raw.vtable.type_identity().is::<T>() {
            return None;
        }
        // SAFETY: The vtable was created for the pointee's type, which we just
        // checked is `T`. The pointer is live while `self` is borrowed.
        Some(unsafe { raw.ptr.cast::<T>().as_ref() })
    }

    /// Get a mutable reference to the held value if it is of type T
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        let raw = self.raw.as_mut()?;
        if !raw.vtable.type_identity().is::<T>() {
            return None;
        }
        // SAFETY: As in `downcast_ref`; the pointer is uniquely owned and we
        // hold `&mut self`.
        Some(unsafe { raw.ptr.cast::<T>().as_mut() })
    }

    /// Moves the held value out of the container
    ///
    /// # Errors
    ///
    /// Returns the container unchanged if it is empty or holds another type.
    pub fn into_inner<T: 'static>(mut self) -> Result<T, ErasedValue> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.raw.take() {
            Some(raw) => {
                // SAFETY: The type was checked above and taking `raw` out of
                // `self` transfers ownership to the reconstructed box.
                let boxed: Box<T> = unsafe { Box::from_raw(raw.ptr.cast::<T>().as_ptr()) };
                std::mem::forget(raw);
                Ok(*boxed)
            }
            None => Err(self),
        }
    }
}

impl Drop for Raw {
    fn drop(&mut self) {
        // SAFETY: By the invariant on `Raw` the pointer came from `Box<T>` for
        // the vtable's `T` and is uniquely owned; it is not used after drop.
        unsafe { self.vtable.drop(self.ptr) }
    }
}

impl Clone for Raw {
    fn clone(&self) -> Self {
        Raw {
            // SAFETY: By the invariant on `Raw` the pointer is live and matches
            // the vtable.
            ptr: unsafe { self.vtable.clone(self.ptr) },
            vtable: self.vtable,
        }
    }
}

impl Clone for ErasedValue {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl Default for ErasedValue {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f
                .debug_struct("ErasedValue")
                .field("type", &raw.vtable.type_identity().name())
                .finish_non_exhaustive(),
            None => f.write_str("ErasedValue(<empty>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Tracked {
        drops: Arc<AtomicUsize>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_empty_container() {
        let value = ErasedValue::new_empty();
        assert!(!value.has_value());
        assert!(value.type_identity().is_none());
        assert_eq!(value.type_name(), "<none>");
        assert!(matches!(
            value.extract::<i32>(),
            Err(AnyError::TypeMismatch { found, .. }) if found.is_none()
        ));
    }

    #[test]
    fn test_downcast_mut_modifies_held_value() {
        let mut value = ErasedValue::new(vec![1, 2, 3]);
        value.downcast_mut::<Vec<i32>>().unwrap().push(4);
        assert_eq!(value.extract::<Vec<i32>>().unwrap(), vec![1, 2, 3, 4]);
        assert!(value.downcast_mut::<Vec<u32>>().is_none());
    }

    #[test]
    fn test_into_inner() {
        let value = ErasedValue::new(String::from("owned"));
        let value = value.into_inner::<i32>().unwrap_err();
        assert_eq!(value.extract::<String>().unwrap(), "owned");
        assert_eq!(value.into_inner::<String>().unwrap(), "owned");

        assert!(ErasedValue::new_empty().into_inner::<String>().is_err());
    }

    #[test]
    fn test_every_value_dropped_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        {
            let mut a = ErasedValue::new(Tracked {
                drops: Arc::clone(&drops),
            });
            let mut b = a.clone();
            let c = b.take();
            a.assign(&c);
            assert_eq!(drops.load(Ordering::SeqCst), 1);
            b.assign_from(c);
            a.reset();
            assert_eq!(drops.load(Ordering::SeqCst), 2);
            let inner = b.into_inner::<Tracked>().unwrap();
            assert_eq!(drops.load(Ordering::SeqCst), 2);
            drop(inner);
        }
        assert_eq!(drops.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_debug_names_type() {
        assert!(format!("{:?}", ErasedValue::new(1u8)).contains("u8"));
        assert_eq!(format!("{:?}", ErasedValue::new_empty()), "ErasedValue(<empty>)");
    }
}
