//! Opaque host values
//!
//! Host values are objects owned by the embedding application that can be
//! stored in a dynabean property. The engine treats them as shared references
//! unless the host type opts into a copy capability.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Result of a host copy capability
pub type HostCopyResult = Result<Rc<dyn HostObject>, Box<dyn Error + Send + Sync>>;

/// Object supplied by the host application
///
/// Implementors that override [`equals`](HostObject::equals) must override
/// [`hash_code`](HostObject::hash_code) consistently.
pub trait HostObject: fmt::Debug {
    /// Name matched against [`Type::Host`](crate::Type::Host) declarations
    fn type_name(&self) -> &str;

    /// Copy capability used by deep copy
    ///
    /// `None` means the value has no copy capability and is shared by
    /// reference. `Some(Err(_))` is surfaced as a copy failure.
    fn copy_value(&self) -> Option<HostCopyResult> {
        None
    }

    /// Equality with another host object; identity by default
    fn equals(&self, other: &dyn HostObject) -> bool {
        std::ptr::eq(
            std::ptr::from_ref(self).cast::<()>(),
            std::ptr::from_ref(other).cast::<()>(),
        )
    }

    /// Hash consistent with [`equals`](HostObject::equals); address by default
    fn hash_code(&self) -> u64 {
        std::ptr::from_ref(self).cast::<()>() as usize as u64
    }

    /// Access for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a [`HostObject`]
#[derive(Clone)]
pub struct HostValue(Rc<dyn HostObject>);

impl HostValue {
    /// Wrap a host object
    pub fn new<T: HostObject + 'static>(object: T) -> Self {
        HostValue(Rc::new(object))
    }

    /// Wrap an already shared host object
    pub fn from_rc(object: Rc<dyn HostObject>) -> Self {
        HostValue(object)
    }

    /// Host type name
    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    /// Borrow the host object
    pub fn object(&self) -> &dyn HostObject {
        &*self.0
    }

    /// Downcast to a concrete host type
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Check whether both handles point at the same object
    pub fn ptr_eq(&self, other: &HostValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.equals(&*other.0)
    }
}

impl Eq for HostValue {}

impl Hash for HostValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash_code());
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
