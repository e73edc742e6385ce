use crate::{
    registry::{modifier::Modifier, outcome::GameOutcome},
    type_key::TypeKey,
};

/// Constructor argument naming a registered outcome type
///
/// It has no codec of its own: on the wire it is the outcome's numeric id,
/// resolved against the outcome registry of the reading peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutcomeRef(TypeKey);

impl OutcomeRef {
    pub fn of<T: GameOutcome>() -> Self {
        Self(TypeKey::of::<T>())
    }

    pub fn from_key(key: TypeKey) -> Self {
        Self(key)
    }

    pub fn type_key(&self) -> TypeKey {
        self.0
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.0 == TypeKey::of::<T>()
    }
}

/// Constructor argument naming a registered modifier type, sent as the
/// modifier's numeric id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModifierRef(TypeKey);

impl ModifierRef {
    pub fn of<M: Modifier>() -> Self {
        Self(TypeKey::of::<M>())
    }

    pub fn from_key(key: TypeKey) -> Self {
        Self(key)
    }

    pub fn type_key(&self) -> TypeKey {
        self.0
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.0 == TypeKey::of::<T>()
    }
}
