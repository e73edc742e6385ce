use thiserror::Error;

use crate::{codec::error::CodecError, rpc::envelope::RpcTag};

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Another RPC already uses this tag
    #[error("An RPC is already registered for tag {tag:?}")]
    DuplicateRpc {
        tag: RpcTag,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}
