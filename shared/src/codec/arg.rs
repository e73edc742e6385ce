use std::{any::Any, fmt};

use crate::type_key::TypeKey;

/// Object-safe view of a value that can travel as a constructor argument
pub trait NetValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_box(&self) -> Box<dyn NetValue>;
    fn dyn_eq(&self, other: &dyn NetValue) -> bool;
}

impl<T: Any + fmt::Debug + Clone + PartialEq + Send + Sync> NetValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn NetValue> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn NetValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A type-erased argument value, tagged with its runtime type
pub struct Arg {
    key: TypeKey,
    value: Box<dyn NetValue>,
}

impl Arg {
    pub fn new<T: NetValue>(value: T) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            value: Box::new(value),
        }
    }

    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.key == TypeKey::of::<T>()
    }

    pub fn value(&self) -> &dyn NetValue {
        self.value.as_ref()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref().as_any().downcast_ref::<T>()
    }

    /// Unwraps the value if it is a `T`
    pub fn take<T: 'static>(self) -> Option<T> {
        self.value.into_any().downcast::<T>().ok().map(|value| *value)
    }
}

impl Clone for Arg {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            value: self.value.as_ref().clone_box(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value.as_ref().dyn_eq(other.value.as_ref())
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}
