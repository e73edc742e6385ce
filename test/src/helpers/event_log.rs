use std::cell::RefCell;

use modnet_shared::{OutcomeId, PeerId, PlayerId, RpcTag};

/// Something observable that happened during a test, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Sent { peer: PeerId, tag: RpcTag },
    Activated { player: PlayerId, label: String },
    Deactivated { player: PlayerId, label: String },
    SessionEnded { peer: PeerId, outcome_id: OutcomeId },
}

thread_local! {
    static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

pub fn record(event: Event) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Drains the events recorded on this thread so far
pub fn take_events() -> Vec<Event> {
    EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
}
