use log::{debug, warn};
use modnet_serde::{
    read_block, read_packed_usize, write_block, write_packed, ByteReader, ByteWrite, ByteWriter,
    Serde,
};

use crate::{
    protocol::Protocol,
    registry::error::ConstructError,
    rpc::{
        custom_rpc::{CustomRpc, HandleContext, LocalHandling},
        data::{ModifierData, RemoveModifierData},
        envelope::RpcTag,
        error::RpcError,
    },
    types::{ModifierTypeId, PeerId, PlayerId},
};

/// Attaches a modifier to a player on every peer
///
/// The arguments travel as one length-prefixed block, so a peer without the
/// modifier can skip them and stay in step with the stream.
pub struct AddModifierRpc;

impl CustomRpc for AddModifierRpc {
    type Payload = ModifierData;

    fn tag(&self) -> RpcTag {
        RpcTag::AddModifier
    }

    fn local_handling(&self) -> LocalHandling {
        LocalHandling::Before
    }

    fn write(
        &self,
        protocol: &Protocol,
        payload: &ModifierData,
        writer: &mut dyn ByteWrite,
    ) -> Result<(), RpcError> {
        let schema = protocol
            .modifiers()
            .schema_for_id(payload.modifier_type_id)
            .ok_or(RpcError::UnknownModifier {
                id: payload.modifier_type_id,
            })?;
        schema.check(&payload.args)?;

        let mut args_writer = ByteWriter::new();
        write_packed(&mut args_writer, payload.args.len() as u64);
        for arg in &payload.args {
            protocol.write_arg(arg, &mut args_writer)?;
        }

        payload.player.ser(writer);
        payload.modifier_type_id.ser(writer);
        write_block(writer, args_writer.as_slice());
        Ok(())
    }

    fn read(&self, protocol: &Protocol, reader: &mut ByteReader) -> Result<ModifierData, RpcError> {
        let config = protocol.config();
        let player = PlayerId::de(reader)?;
        let modifier_type_id = ModifierTypeId::de(reader)?;
        let block = read_block(reader, config.max_block_length)?;

        let Some(schema) = protocol.modifiers().schema_for_id(modifier_type_id) else {
            debug!(
                "Skipping {} argument byte(s) of unknown modifier id {}",
                block.len(),
                modifier_type_id
            );
            return Ok(ModifierData::new(player, modifier_type_id, Vec::new()));
        };

        let mut args_reader = ByteReader::new(block);
        let count = read_packed_usize(&mut args_reader, config.max_sequence_length)?;
        if count != schema.len() {
            return Err(ConstructError::ArityMismatch {
                expected: schema.len(),
                actual: count,
            }
            .into());
        }
        let mut args = Vec::with_capacity(count);
        for param in schema.iter() {
            args.push(protocol.read_arg(&param.ty, &mut args_reader)?);
        }
        if !args_reader.is_empty() {
            return Err(RpcError::TrailingBytes {
                count: args_reader.remaining(),
            });
        }

        Ok(ModifierData::new(player, modifier_type_id, args))
    }

    fn handle(&self, context: &mut HandleContext, origin: PeerId, payload: ModifierData) {
        let ModifierData {
            player,
            modifier_type_id,
            args,
        } = payload;

        let modifiers = context.protocol.modifiers();
        let Some(key) = modifiers.resolve(modifier_type_id) else {
            warn!(
                "Ignoring modifier from {:?}: id {} is not registered on this peer",
                origin, modifier_type_id
            );
            return;
        };
        if !context.state.has_player(player) {
            warn!(
                "Ignoring modifier {} from {:?}: no player {:?}",
                key, origin, player
            );
            return;
        }
        let modifier = match modifiers.try_instantiate(modifier_type_id, args) {
            Ok(modifier) => modifier,
            Err(error) => {
                warn!("Ignoring modifier {} from {:?}: {}", key, origin, error);
                return;
            }
        };

        let Some(component) = context.state.modifiers_of_mut(player) else {
            return;
        };
        if component.attach(player, modifier_type_id, modifier) {
            debug!("Attached {} to {:?}", key, player);
        } else {
            debug!("{:?} already has unique modifier {}", player, key);
        }
    }
}

/// Removes a modifier from a player on every peer
pub struct RemoveModifierRpc;

impl CustomRpc for RemoveModifierRpc {
    type Payload = RemoveModifierData;

    fn tag(&self) -> RpcTag {
        RpcTag::RemoveModifier
    }

    fn local_handling(&self) -> LocalHandling {
        LocalHandling::Before
    }

    fn write(
        &self,
        protocol: &Protocol,
        payload: &RemoveModifierData,
        writer: &mut dyn ByteWrite,
    ) -> Result<(), RpcError> {
        if protocol
            .modifiers()
            .resolve(payload.modifier_type_id)
            .is_none()
        {
            return Err(RpcError::UnknownModifier {
                id: payload.modifier_type_id,
            });
        }
        payload.ser(writer);
        Ok(())
    }

    fn read(
        &self,
        _protocol: &Protocol,
        reader: &mut ByteReader,
    ) -> Result<RemoveModifierData, RpcError> {
        Ok(RemoveModifierData::de(reader)?)
    }

    fn handle(&self, context: &mut HandleContext, origin: PeerId, payload: RemoveModifierData) {
        let RemoveModifierData {
            player,
            modifier_type_id,
        } = payload;

        let Some(key) = context.protocol.modifiers().resolve(modifier_type_id) else {
            warn!(
                "Ignoring modifier removal from {:?}: id {} is not registered on this peer",
                origin, modifier_type_id
            );
            return;
        };
        let Some(component) = context.state.modifiers_of_mut(player) else {
            warn!(
                "Ignoring removal of {} from {:?}: no player {:?}",
                key, origin, player
            );
            return;
        };
        if component.detach(player, modifier_type_id) {
            debug!("Removed {} from {:?}", key, player);
        } else {
            debug!("{:?} has no modifier {} to remove", player, key);
        }
    }
}
