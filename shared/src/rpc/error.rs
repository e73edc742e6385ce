use modnet_serde::SerdeErr;
use thiserror::Error;

use crate::{
    codec::error::CodecError,
    registry::error::{ConstructError, RegistryError},
    rpc::envelope::{EnvelopeError, RpcTag},
};

/// Errors that can occur while writing, reading or dispatching an RPC
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// No RPC with this tag was added to the Protocol
    #[error("No RPC is registered for tag {tag:?}. Add it with Protocol::add_rpc() before sending or receiving it")]
    NotRegistered {
        tag: RpcTag,
    },

    /// The modifier id does not resolve in the local modifier registry
    #[error("Modifier id {id} is not registered on this peer")]
    UnknownModifier {
        id: u32,
    },

    /// A type reference argument names an id the local registry does not know
    #[error("Argument refers to id {id}, which is not registered in the {registry} registry on this peer")]
    UnknownTypeRef {
        registry: &'static str,
        id: u32,
    },

    /// The payload was decoded but bytes were left over
    #[error("RPC payload has {count} trailing byte(s)")]
    TrailingBytes {
        count: usize,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Serialization error: {0}")]
    Serde(#[from] SerdeErr),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Arguments do not match the constructor: {0}")]
    Construct(#[from] ConstructError),

    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
}
