use std::any::type_name;

use crate::{
    registry::{
        as_any::AsAny, constructor::Constructor, error::RegistryError,
        type_registry::TypeRegistry,
    },
    types::{ModifierTypeId, PlayerId},
};

/// A per-player effect declared by an extension
pub trait Modifier: AsAny + Send + Sync {
    /// Display name, defaults to the type name
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// A unique modifier is attached at most once per player
    fn unique(&self) -> bool {
        true
    }

    /// Called when the modifier is attached to `player`
    fn on_activate(&mut self, _player: PlayerId) {}

    /// Called when the modifier is removed from `player`
    fn on_deactivate(&mut self, _player: PlayerId) {}
}

impl dyn Modifier {
    pub fn is<T: Modifier>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Modifier>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Modifier>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Declares the constructors a modifier can be sent with
///
/// The constructor with the fewest parameters is used on the wire, ties go
/// to the first one listed. Its parameter types must all have a codec.
pub trait ModifierConstructors: Modifier + Sized {
    fn constructors() -> Vec<Constructor<Self>>;
}

pub type ModifierRegistry = TypeRegistry<dyn Modifier>;

fn boxed_modifier<M: Modifier>(modifier: M) -> Box<dyn Modifier> {
    Box::new(modifier)
}

impl TypeRegistry<dyn Modifier> {
    /// Creates the modifier registry, handing out ids from `id_offset`
    pub fn modifiers(id_offset: ModifierTypeId) -> Self {
        Self::new("modifier", id_offset, None)
    }

    pub fn register_modifier<M: ModifierConstructors>(&mut self) -> bool {
        self.register(M::constructors(), boxed_modifier::<M>)
    }

    pub fn try_register_modifier<M: ModifierConstructors>(
        &mut self,
    ) -> Result<ModifierTypeId, RegistryError> {
        self.try_register(M::constructors(), boxed_modifier::<M>)
    }
}
