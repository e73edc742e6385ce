use crate::{rpc::envelope::RpcEnvelope, types::{OutcomeId, PeerId}};

/// Who an envelope is delivered to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SendTarget {
    /// Every peer of the session, the sender included, relayed by the host
    Broadcast,
    /// A single peer
    Peer(PeerId),
}

/// The already established session link this peer talks through
pub trait Transport {
    /// Hands `envelope` over for delivery
    fn send(&mut self, envelope: RpcEnvelope, target: SendTarget);

    /// Authoritatively ends the session for every peer. Only ever called on
    /// the host.
    fn end_session(&mut self, outcome_id: OutcomeId);
}
