use modnet_serde::{read_packed_usize, write_packed, ByteReader, ByteWrite, Serde, SerdeErr, DEFAULT_MAX_LENGTH};

use crate::{
    codec::arg::Arg,
    types::{ModifierTypeId, OutcomeId, PlayerId},
};

/// Payload of a game over: which outcome ended the game and who won
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverData {
    pub outcome_id: OutcomeId,
    pub winners: Vec<PlayerId>,
}

impl GameOverData {
    pub fn new(outcome_id: OutcomeId, winners: Vec<PlayerId>) -> Self {
        Self {
            outcome_id,
            winners,
        }
    }

    /// Reads a game over whose winner list holds at most `max_winners` entries
    pub fn de_with_limit(reader: &mut ByteReader, max_winners: usize) -> Result<Self, SerdeErr> {
        let outcome_id = OutcomeId::de(reader)?;
        let count = read_packed_usize(reader, max_winners)?;
        let mut winners = Vec::with_capacity(count);
        for _ in 0..count {
            winners.push(PlayerId::de(reader)?);
        }
        Ok(Self {
            outcome_id,
            winners,
        })
    }
}

impl Serde for GameOverData {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.outcome_id.ser(writer);
        write_packed(writer, self.winners.len() as u64);
        for winner in &self.winners {
            winner.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Self::de_with_limit(reader, DEFAULT_MAX_LENGTH)
    }
}

/// Payload attaching a modifier to a player. `args` follow the parameter
/// list of the modifier's wire constructor.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierData {
    pub player: PlayerId,
    pub modifier_type_id: ModifierTypeId,
    pub args: Vec<Arg>,
}

impl ModifierData {
    pub fn new(player: PlayerId, modifier_type_id: ModifierTypeId, args: Vec<Arg>) -> Self {
        Self {
            player,
            modifier_type_id,
            args,
        }
    }
}

/// Payload removing a modifier from a player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoveModifierData {
    pub player: PlayerId,
    pub modifier_type_id: ModifierTypeId,
}

impl RemoveModifierData {
    pub fn new(player: PlayerId, modifier_type_id: ModifierTypeId) -> Self {
        Self {
            player,
            modifier_type_id,
        }
    }
}

impl Serde for RemoveModifierData {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.player.ser(writer);
        self.modifier_type_id.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            player: PlayerId::de(reader)?,
            modifier_type_id: ModifierTypeId::de(reader)?,
        })
    }
}
