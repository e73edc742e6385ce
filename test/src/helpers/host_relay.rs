use std::sync::Arc;

use modnet_shared::{PeerId, PlayerId, Protocol, SendTarget};

use crate::helpers::test_transport::{test_session, TestSession};

/// Simulated host-relayed session: peer `i` controls player `i`, and every
/// broadcast is delivered to all peers, the sender included, in send order
pub struct HostRelay {
    sessions: Vec<TestSession>,
}

impl HostRelay {
    /// One peer per protocol, all sharing the same player list
    pub fn new(protocols: Vec<Arc<Protocol>>, host: PeerId) -> Self {
        let player_count = protocols.len();
        let sessions = protocols
            .into_iter()
            .enumerate()
            .map(|(index, protocol)| {
                let mut session = test_session(protocol, PeerId(index as u32), host);
                for player in 0..player_count {
                    session.add_player(PlayerId(player as u8), PeerId(player as u32));
                }
                session
            })
            .collect();
        Self { sessions }
    }

    /// `count` peers sharing one protocol
    pub fn with_peers(protocol: Protocol, count: usize, host: PeerId) -> Self {
        let protocol = Arc::new(protocol);
        Self::new(vec![protocol; count], host)
    }

    pub fn peer(&mut self, peer: PeerId) -> &mut TestSession {
        &mut self.sessions[peer.0 as usize]
    }

    pub fn sessions(&self) -> &[TestSession] {
        &self.sessions
    }

    /// Delivers everything sent so far, including anything sent while
    /// handling. Returns the number of envelopes relayed.
    pub fn deliver(&mut self) -> usize {
        let mut relayed = 0;
        loop {
            let mut pending = Vec::new();
            for session in &mut self.sessions {
                let origin = session.local_peer();
                for (envelope, target) in session.transport_mut().take_outbox() {
                    pending.push((origin, envelope.to_bytes(), target));
                }
            }
            if pending.is_empty() {
                return relayed;
            }
            for (origin, bytes, target) in pending {
                relayed += 1;
                match target {
                    SendTarget::Broadcast => {
                        for session in &mut self.sessions {
                            session.receive_bytes(origin, &bytes);
                        }
                    }
                    SendTarget::Peer(peer) => {
                        if let Some(session) = self.sessions.get_mut(peer.0 as usize) {
                            session.receive_bytes(origin, &bytes);
                        }
                    }
                }
            }
        }
    }
}
