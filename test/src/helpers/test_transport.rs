use std::sync::Arc;

use modnet_shared::{OutcomeId, PeerId, Protocol, RpcEnvelope, SendTarget, Session, Transport};

use crate::helpers::event_log::{record, Event};

/// Transport keeping everything handed to it
pub struct RecordingTransport {
    peer: PeerId,
    pub outbox: Vec<(RpcEnvelope, SendTarget)>,
    pub ended: Vec<OutcomeId>,
}

impl RecordingTransport {
    pub fn new(peer: PeerId) -> Self {
        Self {
            peer,
            outbox: Vec::new(),
            ended: Vec::new(),
        }
    }

    pub fn take_outbox(&mut self) -> Vec<(RpcEnvelope, SendTarget)> {
        std::mem::take(&mut self.outbox)
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, envelope: RpcEnvelope, target: SendTarget) {
        record(Event::Sent {
            peer: self.peer,
            tag: envelope.tag,
        });
        self.outbox.push((envelope, target));
    }

    fn end_session(&mut self, outcome_id: OutcomeId) {
        record(Event::SessionEnded {
            peer: self.peer,
            outcome_id,
        });
        self.ended.push(outcome_id);
    }
}

pub type TestSession = Session<RecordingTransport>;

pub fn test_session(protocol: Arc<Protocol>, local_peer: PeerId, host: PeerId) -> TestSession {
    Session::new(protocol, local_peer, host, RecordingTransport::new(local_peer))
}
