use log::info;

use crate::types::PeerId;

/// Tracks which peer is host, and whether the session has been ended by it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostAuthority {
    host: PeerId,
    session_ended: bool,
}

impl HostAuthority {
    pub fn new(host: PeerId) -> Self {
        Self {
            host,
            session_ended: false,
        }
    }

    pub fn host(&self) -> PeerId {
        self.host
    }

    pub fn is_host(&self, peer: PeerId) -> bool {
        self.host == peer
    }

    /// Moves authority to `host`
    pub fn set_host(&mut self, host: PeerId) {
        if host != self.host {
            info!("Host changed from {:?} to {:?}", self.host, host);
            self.host = host;
        }
    }

    pub fn session_ended(&self) -> bool {
        self.session_ended
    }

    /// Returns true the first time it is called for a session, false after
    pub fn claim_session_end(&mut self) -> bool {
        !std::mem::replace(&mut self.session_ended, true)
    }

    /// Prepares for a new session with the same host
    pub fn reset(&mut self) {
        self.session_ended = false;
    }
}
