use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};

use log::{debug, warn};
use modnet_serde::ByteWriter;

use crate::{
    codec::arg::Arg,
    protocol::Protocol,
    registry::{modifier::Modifier, outcome::GameOutcome},
    rpc::{
        custom_rpc::{CustomRpc, HandleContext, LocalHandling},
        data::{GameOverData, ModifierData, RemoveModifierData},
        envelope::{RpcEnvelope, RpcTag},
        error::RpcError,
        game_over_rpc::GameOverRpc,
        modifier_rpc::{AddModifierRpc, RemoveModifierRpc},
    },
    session::{
        state::{PlayerRecord, SessionState},
        transport::{SendTarget, Transport},
    },
    types::{PeerId, PlayerId},
};

/// One peer's end of a running session
///
/// Outgoing RPCs are written and handed to the transport, incoming envelopes
/// are decoded and dispatched to the RPC registered for their tag. Whether
/// the sender runs an RPC itself, and when, follows the RPC's
/// [`LocalHandling`].
pub struct Session<T: Transport> {
    protocol: Arc<Protocol>,
    state: SessionState,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(protocol: Arc<Protocol>, local_peer: PeerId, host: PeerId, transport: T) -> Self {
        if !protocol.is_locked() {
            warn!("Session for {:?} started before Protocol.lock()", local_peer);
        }
        Self {
            protocol,
            state: SessionState::new(local_peer, host),
            transport,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn local_peer(&self) -> PeerId {
        self.state.local_peer()
    }

    pub fn is_host(&self) -> bool {
        self.state.is_host()
    }

    pub fn set_host(&mut self, host: PeerId) {
        self.state.set_host(host);
    }

    pub fn add_player(&mut self, player: PlayerId, owner: PeerId) -> bool {
        self.state.add_player(player, owner)
    }

    pub fn remove_player(&mut self, player: PlayerId) -> Option<PlayerRecord> {
        self.state.remove_player(player)
    }

    // Sending

    /// Broadcasts an RPC to every peer through the host
    pub fn send<R: CustomRpc>(&mut self, rpc: &R, payload: R::Payload) -> Result<(), RpcError> {
        self.send_to(rpc, payload, SendTarget::Broadcast)
    }

    /// Writes the RPC and hands it to the transport. Nothing is sent if
    /// writing fails.
    ///
    /// An RPC handled [`LocalHandling::Before`] runs here before the send.
    /// The envelope is sent even when the local `handle` rejects the payload
    /// or panics: other peers decide for themselves.
    pub fn send_to<R: CustomRpc>(
        &mut self,
        rpc: &R,
        payload: R::Payload,
        target: SendTarget,
    ) -> Result<(), RpcError> {
        let tag = rpc.tag();
        if !self.protocol.rpc_kinds().contains(tag) {
            return Err(RpcError::NotRegistered { tag });
        }

        let mut writer = ByteWriter::new();
        rpc.write(&self.protocol, &payload, &mut writer)?;
        let envelope = RpcEnvelope::new(tag, writer.to_bytes());

        match rpc.local_handling() {
            LocalHandling::Before => {
                let local_peer = self.state.local_peer();
                let mut context = HandleContext {
                    protocol: &self.protocol,
                    state: &mut self.state,
                    transport: &mut self.transport,
                };
                let result = catch_unwind(AssertUnwindSafe(|| {
                    rpc.handle(&mut context, local_peer, payload)
                }));
                if result.is_err() {
                    warn!("Local handling of {:?} panicked", tag);
                }
            }
            LocalHandling::After | LocalHandling::Never => {}
        }

        self.transport.send(envelope, target);
        Ok(())
    }

    /// Ends the game with outcome `O`, which must be registered
    pub fn trigger_game_over<O: GameOutcome>(
        &mut self,
        winners: Vec<PlayerId>,
    ) -> Result<(), RpcError> {
        let outcome_id = self.protocol.outcomes().try_id_of::<O>()?;
        self.send(&GameOverRpc, GameOverData::new(outcome_id, winners))
    }

    /// Attaches modifier `M`, built from `args`, to `player` on every peer
    pub fn add_modifier<M: Modifier>(
        &mut self,
        player: PlayerId,
        args: Vec<Arg>,
    ) -> Result<(), RpcError> {
        let modifier_type_id = self.protocol.modifiers().try_id_of::<M>()?;
        self.send(
            &AddModifierRpc,
            ModifierData::new(player, modifier_type_id, args),
        )
    }

    pub fn remove_modifier<M: Modifier>(&mut self, player: PlayerId) -> Result<(), RpcError> {
        let modifier_type_id = self.protocol.modifiers().try_id_of::<M>()?;
        self.send(
            &RemoveModifierRpc,
            RemoveModifierData::new(player, modifier_type_id),
        )
    }

    // Receiving

    /// Decodes and dispatches raw envelope bytes. Failures are logged.
    pub fn receive_bytes(&mut self, origin: PeerId, bytes: &[u8]) {
        match RpcEnvelope::from_bytes(bytes, self.protocol.config().max_block_length) {
            Ok(envelope) => self.receive(origin, envelope),
            Err(error) => warn!("Dropping envelope from {:?}: {}", origin, error),
        }
    }

    /// Dispatches an envelope to the RPC registered for its tag. Failures
    /// are logged, and a panic raised while reading or handling is caught
    /// so it never unwinds into the transport.
    pub fn receive(&mut self, origin: PeerId, envelope: RpcEnvelope) {
        let protocol: &Protocol = &self.protocol;
        let Some(handler) = protocol.rpc_kinds().handler(envelope.tag) else {
            match envelope.tag {
                RpcTag::SyncOptions => {
                    debug!("Option sync from {:?} is not handled here", origin)
                }
                tag => warn!("Dropping {:?} from {:?}: no RPC registered", tag, origin),
            }
            return;
        };

        if origin == self.state.local_peer() {
            match handler.local_handling() {
                LocalHandling::After => {}
                LocalHandling::Before | LocalHandling::Never => {
                    debug!("Skipping own echo of {:?}", envelope.tag);
                    return;
                }
            }
        }

        let mut context = HandleContext {
            protocol,
            state: &mut self.state,
            transport: &mut self.transport,
        };
        let result = catch_unwind(AssertUnwindSafe(|| {
            handler.read_and_handle(&mut context, origin, &envelope.payload)
        }));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(
                "Failed to handle {:?} from {:?}: {}",
                envelope.tag, origin, error
            ),
            Err(_) => warn!(
                "Handling {:?} from {:?} panicked, the RPC was dropped",
                envelope.tag, origin
            ),
        }
    }
}
