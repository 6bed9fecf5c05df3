use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stand-in type whose identity marks "no value".
enum Nothing {}

/// A process-stable token identifying a concrete type
///
/// Two identities compare equal exactly when they were produced for the same
/// type. The type name is carried along for diagnostics only and takes no part
/// in comparisons.
///
/// # Examples
///
/// ```
/// use sovran_any::TypeIdentity;
///
/// assert_eq!(TypeIdentity::of::<i32>(), TypeIdentity::of::<i32>());
/// assert_ne!(TypeIdentity::of::<i32>(), TypeIdentity::of::<u32>());
/// assert_ne!(TypeIdentity::of::<()>(), TypeIdentity::none());
/// ```
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// Returns the identity of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the identity reported by empty containers
    pub fn none() -> Self {
        Self {
            id: TypeId::of::<Nothing>(),
            name: "<none>",
        }
    }

    /// Returns true if this is the [`none`](Self::none) sentinel
    pub fn is_none(&self) -> bool {
        self.id == TypeId::of::<Nothing>()
    }

    /// Returns true if this identifies `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeIdentity").field(&self.name).finish()
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.name)
    }
}
