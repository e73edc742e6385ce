/// E2E: a peer missing an extension skips its RPCs and stays in step with
/// the rest of the session

use std::sync::Arc;

use modnet_shared::{Arg, PeerId, PlayerId, RegistryError, RpcError};
use modnet_test::{
    assert_game_over_shown, protocol, protocol_without_modifiers, HostRelay, Marked, Triumph,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn relay_with_bare_peer_one() -> HostRelay {
    let full = Arc::new(protocol());
    let bare = Arc::new(protocol_without_modifiers());
    HostRelay::new(vec![full.clone(), bare, full], PeerId(0))
}

#[test]
fn unknown_modifier_is_a_no_op() {
    init();
    let mut relay = relay_with_bare_peer_one();
    let id = relay.peer(PeerId(0)).protocol().modifiers().id_of::<Marked>();
    assert!(relay.peer(PeerId(1)).protocol().modifiers().resolve(id).is_none());

    relay
        .peer(PeerId(0))
        .add_modifier::<Marked>(
            PlayerId(2),
            vec![
                Arg::new(String::from("test")),
                Arg::new(1i32),
                Arg::new(PlayerId(2)),
            ],
        )
        .unwrap();
    relay.deliver();

    let bare = relay.peer(PeerId(1));
    for (_, record) in bare.state().players() {
        assert!(record.modifiers.is_empty());
    }
    for peer in [0, 2] {
        let modifiers = relay.peer(PeerId(peer)).state().modifiers_of(PlayerId(2)).unwrap();
        assert!(modifiers.get::<Marked>().is_some());
    }
}

#[test]
fn later_rpcs_are_still_handled() {
    init();
    let mut relay = relay_with_bare_peer_one();
    let outcome_id = relay.peer(PeerId(0)).protocol().outcomes().id_of::<Triumph>();

    relay
        .peer(PeerId(2))
        .add_modifier::<Marked>(
            PlayerId(0),
            vec![
                Arg::new(String::from("skipped")),
                Arg::new(-7i32),
                Arg::new(PlayerId(0)),
            ],
        )
        .unwrap();
    relay
        .peer(PeerId(2))
        .trigger_game_over::<Triumph>(vec![PlayerId(2)])
        .unwrap();
    relay.deliver();

    assert_game_over_shown!(relay.peer(PeerId(1)), outcome_id);
}

#[test]
fn missing_extension_cannot_send_its_types() {
    init();
    let mut relay = relay_with_bare_peer_one();

    let result = relay
        .peer(PeerId(1))
        .add_modifier::<Marked>(PlayerId(0), Vec::new());

    assert!(matches!(
        result,
        Err(RpcError::Registry(RegistryError::NotRegistered { .. }))
    ));
    assert_eq!(relay.deliver(), 0);
}
