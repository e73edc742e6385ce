//! Extension types and protocols shared by the scenario tests

use std::cell::Cell;

use modnet_shared::{
    Constructor, GameOutcome, Modifier, ModifierConstructors, OutcomeRef, PeerId, PlayerId,
    Protocol, ProtocolPlugin,
};

use crate::helpers::event_log::{record, Event};

thread_local! {
    static VERIFY_CALLS: Cell<usize> = const { Cell::new(0) };
}

/// Number of `verify_condition` calls made on this thread
pub fn verify_calls() -> usize {
    VERIFY_CALLS.with(|calls| calls.get())
}

pub fn reset_verify_calls() {
    VERIFY_CALLS.with(|calls| calls.set(0));
}

fn count_verify_call() {
    VERIFY_CALLS.with(|calls| calls.set(calls.get() + 1));
}

/// Outcome accepting any non-empty winner list
#[derive(Default)]
pub struct Triumph;

impl GameOutcome for Triumph {
    fn verify_condition(&self, _origin: PeerId, winners: &[PlayerId]) -> bool {
        count_verify_call();
        !winners.is_empty()
    }
}

/// Outcome that never verifies
#[derive(Default)]
pub struct NeverWins;

impl GameOutcome for NeverWins {
    fn verify_condition(&self, _origin: PeerId, _winners: &[PlayerId]) -> bool {
        count_verify_call();
        false
    }
}

/// Unique modifier sent with `(String, i32, PlayerId)`
#[derive(Debug, PartialEq)]
pub struct Marked {
    pub label: String,
    pub level: i32,
    pub marked_by: PlayerId,
}

impl Modifier for Marked {
    fn on_activate(&mut self, player: PlayerId) {
        record(Event::Activated {
            player,
            label: self.label.clone(),
        });
    }

    fn on_deactivate(&mut self, player: PlayerId) {
        record(Event::Deactivated {
            player,
            label: self.label.clone(),
        });
    }
}

impl ModifierConstructors for Marked {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::new(|args| {
                let label: String = args.next()?;
                let level = args.next()?;
                let marked_by = args.next()?;
                let _note: String = args.next()?;
                Ok(Marked {
                    label,
                    level,
                    marked_by,
                })
            })
            .param::<String>()
            .param::<i32>()
            .param::<PlayerId>()
            .param::<String>(),
            Constructor::new(|args| {
                Ok(Marked {
                    label: args.next()?,
                    level: args.next()?,
                    marked_by: args.next()?,
                })
            })
            .param::<String>()
            .param::<i32>()
            .param::<PlayerId>(),
        ]
    }
}

/// Stackable modifier sent with a single `u8`
#[derive(Debug, PartialEq)]
pub struct Stacked {
    pub amount: u8,
}

impl Modifier for Stacked {
    fn unique(&self) -> bool {
        false
    }
}

impl ModifierConstructors for Stacked {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(|args| {
            Ok(Stacked {
                amount: args.next()?,
            })
        })
        .param::<u8>()]
    }
}

/// Modifier naming the outcome it pays out on, sent with `(OutcomeRef, u16)`
#[derive(Debug, PartialEq)]
pub struct Bounty {
    pub outcome: OutcomeRef,
    pub reward: u16,
}

impl Modifier for Bounty {}

impl ModifierConstructors for Bounty {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(|args| {
            Ok(Bounty {
                outcome: args.next()?,
                reward: args.next()?,
            })
        })
        .param::<OutcomeRef>()
        .param::<u16>()]
    }
}

/// Registers every test extension type
pub struct TestExtension;

impl ProtocolPlugin for TestExtension {
    fn build(&self, protocol: &mut Protocol) {
        protocol.register_outcome_type::<Triumph>();
        protocol.register_outcome_type::<NeverWins>();
        protocol.register_modifier_type::<Marked>();
        protocol.register_modifier_type::<Stacked>();
        protocol.register_modifier_type::<Bounty>();
    }
}

/// A locked protocol with every test extension loaded
pub fn protocol() -> Protocol {
    let mut protocol = Protocol::builder();
    protocol.add_plugin(TestExtension);
    protocol.lock();
    protocol.build()
}

/// A locked protocol with the test outcomes but none of the modifiers, as
/// loaded by a peer missing the modifier extension
pub fn protocol_without_modifiers() -> Protocol {
    let mut protocol = Protocol::builder();
    protocol.register_outcome_type::<Triumph>();
    protocol.register_outcome_type::<NeverWins>();
    protocol.lock();
    protocol.build()
}
