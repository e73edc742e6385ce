use std::any::type_name;

use crate::{
    registry::{
        as_any::AsAny, constructor::Constructor, error::RegistryError,
        type_registry::TypeRegistry,
    },
    types::{OutcomeId, PeerId, PlayerId},
};

/// A way a session can end, declared by an extension
///
/// Outcomes are built on every receiving peer from their id alone, so each
/// outcome type needs a zero-argument constructor, expressed here as
/// `Default`.
pub trait GameOutcome: AsAny + Send + Sync {
    /// Display name, defaults to the type name
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// Decides whether `winners`, as claimed by `origin`, really won.
    /// Returning false drops the game over on this peer.
    fn verify_condition(&self, origin: PeerId, winners: &[PlayerId]) -> bool;
}

impl dyn GameOutcome {
    pub fn is<T: GameOutcome>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: GameOutcome>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Outcomes the host application implements itself. Their ids come before
/// any extension outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BuiltinOutcome {
    HumansByVote = 0,
    HumansByTask = 1,
    ImpostorsByVote = 2,
    ImpostorsByKill = 3,
    ImpostorsBySabotage = 4,
    ImpostorDisconnect = 5,
    HumansDisconnect = 6,
    HideAndSeekByTimer = 7,
    HideAndSeekByKills = 8,
}

impl BuiltinOutcome {
    pub const COUNT: u32 = 9;

    pub fn id(self) -> OutcomeId {
        self as OutcomeId
    }

    pub fn from_id(id: OutcomeId) -> Option<Self> {
        let outcome = match id {
            0 => Self::HumansByVote,
            1 => Self::HumansByTask,
            2 => Self::ImpostorsByVote,
            3 => Self::ImpostorsByKill,
            4 => Self::ImpostorsBySabotage,
            5 => Self::ImpostorDisconnect,
            6 => Self::HumansDisconnect,
            7 => Self::HideAndSeekByTimer,
            8 => Self::HideAndSeekByKills,
            _ => return None,
        };
        Some(outcome)
    }
}

pub type OutcomeRegistry = TypeRegistry<dyn GameOutcome>;

fn boxed_outcome<T: GameOutcome>(outcome: T) -> Box<dyn GameOutcome> {
    Box::new(outcome)
}

impl TypeRegistry<dyn GameOutcome> {
    /// Creates the outcome registry. Extension ids start right after the
    /// built-in outcomes.
    pub fn outcomes() -> Self {
        Self::new("outcome", BuiltinOutcome::COUNT, Some(0))
    }

    pub fn register_outcome<T: GameOutcome + Default>(&mut self) -> bool {
        self.register(vec![Constructor::new(|_| Ok(T::default()))], boxed_outcome::<T>)
    }

    pub fn try_register_outcome<T: GameOutcome + Default>(
        &mut self,
    ) -> Result<OutcomeId, RegistryError> {
        self.try_register(vec![Constructor::new(|_| Ok(T::default()))], boxed_outcome::<T>)
    }

    /// Builds the outcome registered as `id`
    pub fn instantiate_outcome(&self, id: OutcomeId) -> Option<Box<dyn GameOutcome>> {
        self.instantiate(id, Vec::new())
    }
}
