use crate::{
    registry::modifier::Modifier,
    types::{ModifierTypeId, PlayerId},
};

/// A modifier attached to a player, with the id it was registered under
pub struct AttachedModifier {
    pub type_id: ModifierTypeId,
    pub modifier: Box<dyn Modifier>,
}

/// The modifiers attached to one player, in attach order
#[derive(Default)]
pub struct ModifierComponent {
    attached: Vec<AttachedModifier>,
}

impl ModifierComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `modifier` to `player` and activates it. A unique modifier
    /// already present is not stacked, and false is returned.
    pub fn attach(
        &mut self,
        player: PlayerId,
        type_id: ModifierTypeId,
        mut modifier: Box<dyn Modifier>,
    ) -> bool {
        if modifier.unique() && self.contains(type_id) {
            return false;
        }
        modifier.on_activate(player);
        self.attached.push(AttachedModifier { type_id, modifier });
        true
    }

    /// Deactivates and removes the most recently attached modifier with
    /// `type_id`
    pub fn detach(&mut self, player: PlayerId, type_id: ModifierTypeId) -> bool {
        let Some(index) = self
            .attached
            .iter()
            .rposition(|attached| attached.type_id == type_id)
        else {
            return false;
        };
        let mut attached = self.attached.remove(index);
        attached.modifier.on_deactivate(player);
        true
    }

    /// Deactivates and removes every modifier, newest first
    pub fn clear(&mut self, player: PlayerId) {
        while let Some(mut attached) = self.attached.pop() {
            attached.modifier.on_deactivate(player);
        }
    }

    pub fn contains(&self, type_id: ModifierTypeId) -> bool {
        self.attached
            .iter()
            .any(|attached| attached.type_id == type_id)
    }

    pub fn count(&self, type_id: ModifierTypeId) -> usize {
        self.attached
            .iter()
            .filter(|attached| attached.type_id == type_id)
            .count()
    }

    /// First attached modifier of type `M`
    pub fn get<M: Modifier>(&self) -> Option<&M> {
        self.attached
            .iter()
            .find_map(|attached| attached.modifier.downcast_ref::<M>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachedModifier> {
        self.attached.iter()
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
