//! # Modnet Shared
//! Registration of extension types and typed RPC dispatch for multiplayer
//! sessions whose peers may run different sets of extensions.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use modnet_serde::{
    read_block, read_packed, read_packed_usize, write_block, write_packed, ByteReader,
    ByteWrite, ByteWriter, Serde, SerdeErr,
};
pub use uuid::Uuid;

mod codec;
mod config;
mod protocol;
mod registry;
mod rpc;
mod session;
mod type_key;
mod types;

pub use codec::{
    arg::{Arg, NetValue},
    codec_registry::{Codec, CodecRegistry, SerdeCodec},
    error::CodecError,
    guid::{GuidCodec, GUID_LENGTH},
};
pub use config::ProtocolConfig;
pub use protocol::{Protocol, ProtocolError, ProtocolPlugin};
pub use registry::{
    as_any::AsAny,
    constructor::{
        BuildFn, Constructor, ConstructorArgs, ConstructorSchema, ErasedConstructor, SchemaParam,
    },
    constructor_cache::{select_constructor, ConstructorCache},
    error::{ConstructError, RegistryError},
    modifier::{Modifier, ModifierConstructors, ModifierRegistry},
    outcome::{BuiltinOutcome, GameOutcome, OutcomeRegistry},
    type_ref::{ModifierRef, OutcomeRef},
    type_registry::TypeRegistry,
};
pub use rpc::{
    custom_rpc::{CustomRpc, HandleContext, LocalHandling},
    data::{GameOverData, ModifierData, RemoveModifierData},
    envelope::{EnvelopeError, RpcEnvelope, RpcTag},
    error::RpcError,
    game_over_rpc::GameOverRpc,
    modifier_rpc::{AddModifierRpc, RemoveModifierRpc},
    rpc_kinds::RpcKinds,
};
pub use session::{
    host_authority::HostAuthority,
    modifier_component::{AttachedModifier, ModifierComponent},
    peer_session::Session,
    state::{ActiveGameOver, PlayerRecord, SessionState},
    transport::{SendTarget, Transport},
};
pub use type_key::TypeKey;
pub use types::{ModifierTypeId, OutcomeId, PeerId, PlayerId};
