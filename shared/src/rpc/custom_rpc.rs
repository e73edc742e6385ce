use modnet_serde::{ByteReader, ByteWrite};

use crate::{
    protocol::Protocol,
    rpc::{envelope::RpcTag, error::RpcError},
    session::{state::SessionState, transport::Transport},
    types::PeerId,
};

/// Whether and when the peer sending an RPC runs its handler itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocalHandling {
    /// Handle locally before the envelope is handed to the transport
    Before,
    /// Handle locally only once the host relays the broadcast back
    After,
    /// Never handle locally
    Never,
}

/// What a handler may touch while it runs on a peer
pub struct HandleContext<'s> {
    pub protocol: &'s Protocol,
    pub state: &'s mut SessionState,
    pub transport: &'s mut dyn Transport,
}

/// An RPC kind: how its payload is written and read, and what every
/// receiving peer does with it
///
/// `handle` runs on a network path. It must log failures and return, never
/// panic, since a failing peer would silently fall out of sync with the rest
/// of the session.
pub trait CustomRpc: Send + Sync + 'static {
    type Payload;

    fn tag(&self) -> RpcTag;

    fn local_handling(&self) -> LocalHandling;

    fn write(
        &self,
        protocol: &Protocol,
        payload: &Self::Payload,
        writer: &mut dyn ByteWrite,
    ) -> Result<(), RpcError>;

    fn read(&self, protocol: &Protocol, reader: &mut ByteReader) -> Result<Self::Payload, RpcError>;

    fn handle(&self, context: &mut HandleContext, origin: PeerId, payload: Self::Payload);
}
