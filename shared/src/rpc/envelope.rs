use std::convert::TryFrom;

use modnet_serde::{read_block, write_block, ByteReader, ByteWrite, ByteWriter, SerdeErr};
use thiserror::Error;

/// Identifies an RPC on the wire. Every peer of a session must share this
/// list, so new tags are only ever appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RpcTag {
    /// Reserved for option synchronization, which is carried by another layer
    SyncOptions = 0,
    AddModifier = 1,
    RemoveModifier = 2,
    GameOver = 3,
}

impl TryFrom<u8> for RpcTag {
    type Error = EnvelopeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::SyncOptions),
            1 => Ok(Self::AddModifier),
            2 => Ok(Self::RemoveModifier),
            3 => Ok(Self::GameOver),
            tag => Err(EnvelopeError::UnknownTag { tag }),
        }
    }
}

impl From<RpcTag> for u8 {
    fn from(tag: RpcTag) -> Self {
        tag as u8
    }
}

/// Errors that can occur while decoding an [`RpcEnvelope`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The tag byte is not part of the shared tag list
    #[error("Unknown RPC tag {tag}")]
    UnknownTag {
        tag: u8,
    },

    /// Bytes follow the payload block
    #[error("Envelope has {count} trailing byte(s)")]
    TrailingBytes {
        count: usize,
    },

    #[error("Malformed envelope: {0}")]
    Serde(#[from] SerdeErr),
}

/// An encoded RPC as handed to and received from the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcEnvelope {
    pub tag: RpcTag,
    pub payload: Vec<u8>,
}

impl RpcEnvelope {
    pub fn new(tag: RpcTag, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    /// Tag byte followed by the payload as a length-prefixed block
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.payload.len() + 4);
        writer.write_byte(self.tag.into());
        write_block(&mut writer, &self.payload);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8], max_payload: usize) -> Result<Self, EnvelopeError> {
        let mut reader = ByteReader::new(bytes);
        let tag = RpcTag::try_from(reader.read_byte()?)?;
        let payload = read_block(&mut reader, max_payload)?.to_vec();
        if !reader.is_empty() {
            return Err(EnvelopeError::TrailingBytes {
                count: reader.remaining(),
            });
        }
        Ok(Self { tag, payload })
    }
}
