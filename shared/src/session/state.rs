use std::collections::BTreeMap;

use log::debug;

use crate::{
    registry::outcome::GameOutcome,
    session::{host_authority::HostAuthority, modifier_component::ModifierComponent},
    types::{OutcomeId, PeerId, PlayerId},
};

/// The game over this peer currently displays
pub struct ActiveGameOver {
    pub outcome_id: OutcomeId,
    pub outcome: Box<dyn GameOutcome>,
    pub winners: Vec<PlayerId>,
    pub origin: PeerId,
}

/// A player slot, the peer controlling it, and its modifiers
pub struct PlayerRecord {
    pub owner: PeerId,
    pub modifiers: ModifierComponent,
}

/// What one peer knows about the running session
pub struct SessionState {
    local_peer: PeerId,
    authority: HostAuthority,
    players: BTreeMap<PlayerId, PlayerRecord>,
    game_over: Option<ActiveGameOver>,
}

impl SessionState {
    pub fn new(local_peer: PeerId, host: PeerId) -> Self {
        Self {
            local_peer,
            authority: HostAuthority::new(host),
            players: BTreeMap::new(),
            game_over: None,
        }
    }

    pub fn local_peer(&self) -> PeerId {
        self.local_peer
    }

    /// Whether this peer holds host authority
    pub fn is_host(&self) -> bool {
        self.authority.is_host(self.local_peer)
    }

    pub fn host(&self) -> PeerId {
        self.authority.host()
    }

    pub fn set_host(&mut self, host: PeerId) {
        self.authority.set_host(host);
    }

    pub fn authority(&self) -> &HostAuthority {
        &self.authority
    }

    pub fn authority_mut(&mut self) -> &mut HostAuthority {
        &mut self.authority
    }

    // Players

    /// Adds a player slot owned by `owner`. Returns false if the slot is taken.
    pub fn add_player(&mut self, player: PlayerId, owner: PeerId) -> bool {
        if self.players.contains_key(&player) {
            return false;
        }
        self.players.insert(
            player,
            PlayerRecord {
                owner,
                modifiers: ModifierComponent::new(),
            },
        );
        true
    }

    /// Removes a player, deactivating its modifiers
    pub fn remove_player(&mut self, player: PlayerId) -> Option<PlayerRecord> {
        let mut record = self.players.remove(&player)?;
        debug!(
            "Removing {:?} with {} modifier(s)",
            player,
            record.modifiers.len()
        );
        record.modifiers.clear(player);
        Some(record)
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.players.contains_key(&player)
    }

    pub fn player(&self, player: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&player)
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerRecord)> {
        self.players.iter().map(|(player, record)| (*player, record))
    }

    pub fn modifiers_of(&self, player: PlayerId) -> Option<&ModifierComponent> {
        self.players.get(&player).map(|record| &record.modifiers)
    }

    pub fn modifiers_of_mut(&mut self, player: PlayerId) -> Option<&mut ModifierComponent> {
        self.players
            .get_mut(&player)
            .map(|record| &mut record.modifiers)
    }

    // Game over

    pub fn game_over(&self) -> Option<&ActiveGameOver> {
        self.game_over.as_ref()
    }

    pub fn set_game_over(&mut self, game_over: ActiveGameOver) {
        self.game_over = Some(game_over);
    }

    /// Clears the displayed game over and the ended flag for a new round
    pub fn reset_game_over(&mut self) {
        self.game_over = None;
        self.authority.reset();
    }
}
