use crate::{AnyError, TypeIdentity};
use std::any::Any;
use std::fmt;

/// A type-erased value that can clone itself
///
/// Implemented for every `Clone + Send + Sync + 'static` type, this is the
/// per-type "vtable" of [`BoxedValue`], supplied by the compiler instead of
/// being assembled by hand.
pub trait CloneAny: Any + Send + Sync {
    /// Clone the value into a new boxed trait object
    fn clone_box(&self) -> Box<dyn CloneAny>;

    /// Get as Any reference for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get as mutable Any reference for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert the box into `Box<dyn Any>` for owned downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// Get the identity of the concrete type
    fn type_identity(&self) -> TypeIdentity;
}

impl<T> CloneAny for T
where
    T: Clone + Send + Sync + 'static,
{
    fn clone_box(&self) -> Box<dyn CloneAny> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn type_identity(&self) -> TypeIdentity {
        TypeIdentity::of::<T>()
    }
}

/// A container holding at most one value of an arbitrary type, dispatching
/// through a trait object
///
/// `BoxedValue` offers the same operations as [`ErasedValue`](crate::ErasedValue)
/// but stores a `Box<dyn CloneAny>` and contains no unsafe code.
///
/// # Examples
///
/// ```
/// use sovran_any::BoxedValue;
///
/// let a = BoxedValue::new(vec![1, 2, 3]);
/// let mut b = a.clone();
/// b.downcast_mut::<Vec<i32>>().unwrap().push(4);
///
/// assert_eq!(a.extract::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
/// assert_eq!(b.extract::<Vec<i32>>().unwrap(), vec![1, 2, 3, 4]);
/// ```
#[derive(Default)]
pub struct BoxedValue {
    value: Option<Box<dyn CloneAny>>,
}

impl BoxedValue {
    /// Creates an empty container. Does not allocate.
    pub const fn new_empty() -> Self {
        Self { value: None }
    }

    /// Create a new BoxedValue from a value of any type that implements Clone, Send, and Sync
    pub fn new<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Some(Box::new(value)),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the identity of the held type, or [`TypeIdentity::none()`] when empty
    pub fn type_identity(&self) -> TypeIdentity {
        match &self.value {
            // Dispatch on the boxed value, not on the `Box` itself.
            Some(value) => (**value).type_identity(),
            None => TypeIdentity::none(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_identity().name()
    }

    /// Check if the contained value is of type T
    pub fn is<T: 'static>(&self) -> bool {
        self.type_identity().is::<T>()
    }

    pub fn reset(&mut self) {
        self.value = None;
    }

    pub fn swap(&mut self, other: &mut BoxedValue) {
        std::mem::swap(&mut self.value, &mut other.value);
    }

    /// Moves the contents out, leaving `self` empty
    pub fn take(&mut self) -> BoxedValue {
        BoxedValue {
            value: self.value.take(),
        }
    }

    /// Replaces the contents with a deep clone of `source`
    ///
    /// If cloning panics, `self` keeps its previous contents.
    pub fn assign(&mut self, source: &BoxedValue) {
        let mut temp = source.clone();
        self.swap(&mut temp);
    }

    /// Replaces the contents with those of `source`
    pub fn assign_from(&mut self, mut source: BoxedValue) {
        self.swap(&mut source);
    }

    /// Returns a clone of the contained value
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

    /// Get a reference to the contained value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        let value: &dyn CloneAny = &**self.value.as_ref()?;
        value.as_any().downcast_ref::<T>()
    }

    /// Get a mutable reference to the contained value if it is of type T
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        let value: &mut dyn CloneAny = &mut **self.value.as_mut()?;
        value.as_any_mut().downcast_mut::<T>()
    }

    /// Moves the contained value out of the container
    ///
    /// # Errors
    ///
    /// Returns the container unchanged if it is empty or holds another type.
    pub fn into_inner<T: 'static>(self) -> Result<T, BoxedValue> {
        match self.value {
            Some(value) if (*value).type_identity().is::<T>() => value
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| BoxedValue::new_empty()),
            value => Err(BoxedValue { value }),
        }
    }
}

impl Clone for BoxedValue {
    fn clone(&self) -> Self {
        Self {
            value: self.value.as_ref().map(|value| (**value).clone_box()),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl fmt::Debug for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_value() {
            f.debug_struct("BoxedValue")
                .field("type", &self.type_name())
                .finish_non_exhaustive()
        } else {
            f.write_str("BoxedValue(<empty>)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_identity_is_of_contents() {
        let value = BoxedValue::new(42u64);
        assert_eq!(value.type_identity(), TypeIdentity::of::<u64>());
        assert!(!value.is::<Box<dyn CloneAny>>());
        assert!(BoxedValue::new_empty().type_identity().is_none());
    }

    #[test]
    fn test_clone_box_is_deep() {
        let value: Box<dyn CloneAny> = Box::new(String::from("hello"));
        let mut cloned = value.clone_box();
        cloned
            .as_any_mut()
            .downcast_mut::<String>()
            .unwrap()
            .push_str(" world");

        assert_eq!(value.as_any().downcast_ref::<String>().unwrap(), "hello");
        assert_eq!(
            cloned.as_any().downcast_ref::<String>().unwrap(),
            "hello world"
        );
    }

    #[test]
    fn test_into_inner() {
        let value = BoxedValue::new(7i16);
        let value = value.into_inner::<i32>().unwrap_err();
        assert_eq!(value.extract::<i16>().unwrap(), 7);
        assert_eq!(value.into_inner::<i16>().unwrap(), 7);
    }

    #[test]
    fn test_debug_names_type() {
        assert!(format!("{:?}", BoxedValue::new(1.5f32)).contains("f32"));
        assert_eq!(format!("{:?}", BoxedValue::default()), "BoxedValue(<empty>)");
    }
}
