/// E2E: a game over travels through the host before anyone acts on it, and
/// only the host ends the session

use std::sync::Arc;

use modnet_shared::{BuiltinOutcome, PeerId, PlayerId, RpcTag};
use modnet_test::{
    assert_ended_only_on, assert_game_over_shown, protocol, protocol_without_modifiers,
    reset_verify_calls, take_events, verify_calls, Event, HostRelay, NeverWins, Triumph,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
    reset_verify_calls();
    take_events();
}

#[test]
fn custom_outcome_ends_session_on_host_only() {
    init();
    let mut relay = HostRelay::with_peers(protocol(), 3, PeerId(0));
    let outcome_id = relay.peer(PeerId(0)).protocol().outcomes().id_of::<Triumph>();
    assert_eq!(outcome_id, BuiltinOutcome::COUNT, "First custom id follows the built-ins");

    relay
        .peer(PeerId(1))
        .trigger_game_over::<Triumph>(vec![PlayerId(1), PlayerId(3)])
        .unwrap();

    // Nobody acts before the host relays the broadcast
    assert_eq!(verify_calls(), 0);
    assert!(relay.peer(PeerId(1)).state().game_over().is_none());

    relay.deliver();

    assert_eq!(verify_calls(), 3, "Every peer verifies the outcome");
    for peer in 0..3 {
        let session = relay.peer(PeerId(peer));
        assert_game_over_shown!(session, outcome_id);
        let game_over = session.state().game_over().unwrap();
        assert_eq!(game_over.winners, vec![PlayerId(1), PlayerId(3)]);
        assert_eq!(game_over.origin, PeerId(1));
        assert!(game_over.outcome.is::<Triumph>());
    }
    assert_ended_only_on!(relay, outcome_id, [PeerId(0)]);
}

#[test]
fn host_originated_game_over_ends_once() {
    init();
    let mut relay = HostRelay::with_peers(protocol(), 3, PeerId(0));
    let outcome_id = relay.peer(PeerId(0)).protocol().outcomes().id_of::<Triumph>();

    relay
        .peer(PeerId(0))
        .trigger_game_over::<Triumph>(vec![PlayerId(0)])
        .unwrap();
    relay.deliver();

    assert_ended_only_on!(relay, outcome_id, [PeerId(0)]);
    let events = take_events();
    assert_eq!(
        events.first(),
        Some(&Event::Sent {
            peer: PeerId(0),
            tag: RpcTag::GameOver
        })
    );
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::SessionEnded { .. }))
            .count(),
        1
    );
}

#[test]
fn repeated_game_over_does_not_end_twice() {
    init();
    let mut relay = HostRelay::with_peers(protocol(), 3, PeerId(0));
    let outcome_id = relay.peer(PeerId(0)).protocol().outcomes().id_of::<Triumph>();

    relay
        .peer(PeerId(1))
        .trigger_game_over::<Triumph>(vec![PlayerId(1)])
        .unwrap();
    relay
        .peer(PeerId(2))
        .trigger_game_over::<Triumph>(vec![PlayerId(2)])
        .unwrap();
    relay.deliver();

    assert_ended_only_on!(relay, outcome_id, [PeerId(0)]);
    assert!(relay.peer(PeerId(0)).state().authority().session_ended());
    // The last verified game over is the one displayed
    assert_eq!(
        relay.peer(PeerId(0)).state().game_over().unwrap().winners,
        vec![PlayerId(2)]
    );
}

#[test]
fn rejected_condition_changes_nothing() {
    init();
    let mut relay = HostRelay::with_peers(protocol(), 3, PeerId(0));

    relay
        .peer(PeerId(2))
        .trigger_game_over::<NeverWins>(vec![PlayerId(2)])
        .unwrap();
    relay.deliver();

    assert_eq!(verify_calls(), 3);
    for peer in 0..3 {
        let session = relay.peer(PeerId(peer));
        assert!(session.state().game_over().is_none());
        assert!(session.transport().ended.is_empty());
    }
}

#[test]
fn migrated_host_takes_over_authority() {
    init();
    let mut relay = HostRelay::with_peers(protocol(), 3, PeerId(0));
    let outcome_id = relay.peer(PeerId(0)).protocol().outcomes().id_of::<Triumph>();
    for peer in 0..3 {
        relay.peer(PeerId(peer)).set_host(PeerId(2));
    }

    relay
        .peer(PeerId(0))
        .trigger_game_over::<Triumph>(vec![PlayerId(0)])
        .unwrap();
    relay.deliver();

    assert_ended_only_on!(relay, outcome_id, [PeerId(2)]);
}

#[test]
fn peer_without_outcome_ignores_game_over() {
    init();
    let full = Arc::new(protocol());
    let mut bare = modnet_shared::Protocol::builder();
    bare.lock();
    let bare = Arc::new(bare.build());
    let mut relay = HostRelay::new(vec![full.clone(), full, bare], PeerId(0));
    let outcome_id = relay.peer(PeerId(0)).protocol().outcomes().id_of::<Triumph>();

    relay
        .peer(PeerId(1))
        .trigger_game_over::<Triumph>(vec![PlayerId(1)])
        .unwrap();
    relay.deliver();

    assert_eq!(verify_calls(), 2);
    assert!(relay.peer(PeerId(2)).state().game_over().is_none());
    assert_game_over_shown!(relay.peer(PeerId(1)), outcome_id);
    assert_ended_only_on!(relay, outcome_id, [PeerId(0)]);
}

#[test]
fn host_missing_outcome_cannot_end_session() {
    init();
    let full = Arc::new(protocol());
    let mut bare = modnet_shared::Protocol::builder();
    bare.lock();
    let bare = Arc::new(bare.build());
    let mut relay = HostRelay::new(vec![bare, full.clone(), full], PeerId(0));

    relay
        .peer(PeerId(1))
        .trigger_game_over::<Triumph>(vec![PlayerId(1)])
        .unwrap();
    relay.deliver();

    for session in relay.sessions() {
        assert!(session.transport().ended.is_empty());
    }
    assert!(relay.peer(PeerId(2)).state().game_over().is_some());
}

#[test]
fn builtin_outcome_ids_are_ignored() {
    init();
    let mut relay = HostRelay::with_peers(protocol_without_modifiers(), 3, PeerId(0));
    let data = modnet_shared::GameOverData::new(
        BuiltinOutcome::ImpostorsByKill.id(),
        vec![PlayerId(1)],
    );

    relay
        .peer(PeerId(1))
        .send(&modnet_shared::GameOverRpc, data)
        .unwrap();
    relay.deliver();

    assert_eq!(verify_calls(), 0);
    for session in relay.sessions() {
        assert!(session.state().game_over().is_none());
        assert!(session.transport().ended.is_empty());
    }
}
