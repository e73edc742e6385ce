/// E2E: constructor arguments naming a registered type travel as that type's
/// id and resolve against the receiving peer's registry

use std::sync::Arc;

use modnet_shared::{
    AddModifierRpc, Arg, ByteReader, ByteWriter, CustomRpc, GameOutcome, ModifierData,
    OutcomeRef, PeerId, PlayerId, Protocol, RegistryError, RpcError,
};
use modnet_test::{protocol, take_events, Bounty, HostRelay, Marked, Stacked, Triumph};

#[derive(Default)]
struct Unlisted;

impl GameOutcome for Unlisted {
    fn verify_condition(&self, _origin: PeerId, _winners: &[PlayerId]) -> bool {
        true
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
    take_events();
}

fn bounty_args() -> Vec<Arg> {
    vec![Arg::new(OutcomeRef::of::<Triumph>()), Arg::new(5u16)]
}

/// The test modifiers under the same ids, but none of the test outcomes
fn protocol_without_outcomes() -> Protocol {
    let mut protocol = Protocol::builder();
    protocol.register_modifier_type::<Marked>();
    protocol.register_modifier_type::<Stacked>();
    protocol.register_modifier_type::<Bounty>();
    protocol.lock();
    protocol.build()
}

#[test]
fn outcome_reference_round_trips() {
    init();
    let sender = protocol();
    let receiver = protocol();
    let id = sender.modifiers().id_of::<Bounty>();
    let data = ModifierData::new(PlayerId(0), id, bounty_args());

    let mut writer = ByteWriter::new();
    AddModifierRpc.write(&sender, &data, &mut writer).unwrap();
    let bytes = writer.to_bytes();

    let mut reader = ByteReader::new(&bytes);
    let decoded = AddModifierRpc.read(&receiver, &mut reader).unwrap();
    assert!(reader.is_empty());
    assert_eq!(decoded, data);

    let modifier = receiver
        .modifiers()
        .instantiate(decoded.modifier_type_id, decoded.args)
        .unwrap();
    let bounty = modifier.downcast_ref::<Bounty>().unwrap();
    assert!(bounty.outcome.is::<Triumph>());
    assert_eq!(bounty.reward, 5);
}

#[test]
fn outcome_reference_is_written_as_its_id() {
    init();
    let protocol = protocol();
    let outcome_id = protocol.outcomes().id_of::<Triumph>();

    let mut writer = ByteWriter::new();
    protocol
        .write_arg(&Arg::new(OutcomeRef::of::<Triumph>()), &mut writer)
        .unwrap();

    assert_eq!(writer.to_bytes(), vec![outcome_id as u8]);
}

#[test]
fn unregistered_outcome_reference_is_not_sent() {
    init();
    let mut relay = HostRelay::with_peers(protocol(), 2, PeerId(0));

    let result = relay.peer(PeerId(1)).add_modifier::<Bounty>(
        PlayerId(0),
        vec![Arg::new(OutcomeRef::of::<Unlisted>()), Arg::new(5u16)],
    );

    assert!(matches!(
        result,
        Err(RpcError::Registry(RegistryError::NotRegistered {
            registry: "outcome",
            ..
        }))
    ));
    assert_eq!(relay.deliver(), 0);
}

#[test]
fn unknown_outcome_reference_fails_to_read() {
    init();
    let sender = protocol();
    let receiver = protocol_without_outcomes();
    let id = sender.modifiers().id_of::<Bounty>();
    let outcome_id = sender.outcomes().id_of::<Triumph>();

    let mut writer = ByteWriter::new();
    AddModifierRpc
        .write(
            &sender,
            &ModifierData::new(PlayerId(0), id, bounty_args()),
            &mut writer,
        )
        .unwrap();
    let bytes = writer.to_bytes();

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(
        AddModifierRpc.read(&receiver, &mut reader),
        Err(RpcError::UnknownTypeRef {
            registry: "outcome",
            id: outcome_id,
        })
    );
}

#[test]
fn peer_without_referenced_outcome_skips_modifier() {
    init();
    let mut relay = HostRelay::new(
        vec![Arc::new(protocol()), Arc::new(protocol_without_outcomes())],
        PeerId(0),
    );

    relay
        .peer(PeerId(0))
        .add_modifier::<Bounty>(PlayerId(1), bounty_args())
        .unwrap();
    relay.deliver();

    let sender = relay.peer(PeerId(0)).state().modifiers_of(PlayerId(1)).unwrap();
    assert_eq!(
        sender.get::<Bounty>(),
        Some(&Bounty {
            outcome: OutcomeRef::of::<Triumph>(),
            reward: 5,
        })
    );
    assert!(relay
        .peer(PeerId(1))
        .state()
        .modifiers_of(PlayerId(1))
        .unwrap()
        .is_empty());
}
