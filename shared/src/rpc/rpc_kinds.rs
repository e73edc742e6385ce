use std::collections::BTreeMap;

use modnet_serde::ByteReader;

use crate::{
    protocol::ProtocolError,
    rpc::{
        custom_rpc::{CustomRpc, HandleContext, LocalHandling},
        envelope::RpcTag,
        error::RpcError,
    },
    types::PeerId,
};

/// A [`CustomRpc`] with its payload type erased, as kept by the dispatch table
pub(crate) trait RpcHandler: Send + Sync {
    fn local_handling(&self) -> LocalHandling;

    fn read_and_handle(
        &self,
        context: &mut HandleContext,
        origin: PeerId,
        payload: &[u8],
    ) -> Result<(), RpcError>;
}

impl<R: CustomRpc> RpcHandler for R {
    fn local_handling(&self) -> LocalHandling {
        CustomRpc::local_handling(self)
    }

    fn read_and_handle(
        &self,
        context: &mut HandleContext,
        origin: PeerId,
        payload: &[u8],
    ) -> Result<(), RpcError> {
        let mut reader = ByteReader::new(payload);
        let payload = self.read(context.protocol, &mut reader)?;
        if !reader.is_empty() {
            return Err(RpcError::TrailingBytes {
                count: reader.remaining(),
            });
        }
        self.handle(context, origin, payload);
        Ok(())
    }
}

/// Dispatch table from [`RpcTag`] to the RPC handling it
pub struct RpcKinds {
    handlers: BTreeMap<RpcTag, Box<dyn RpcHandler>>,
}

impl RpcKinds {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn add_rpc<R: CustomRpc>(&mut self, rpc: R) -> Result<(), ProtocolError> {
        let tag = rpc.tag();
        if self.handlers.contains_key(&tag) {
            return Err(ProtocolError::DuplicateRpc { tag });
        }
        self.handlers.insert(tag, Box::new(rpc));
        Ok(())
    }

    pub fn contains(&self, tag: RpcTag) -> bool {
        self.handlers.contains_key(&tag)
    }

    pub fn local_handling(&self, tag: RpcTag) -> Option<LocalHandling> {
        self.handlers
            .get(&tag)
            .map(|handler| handler.local_handling())
    }

    pub(crate) fn handler(&self, tag: RpcTag) -> Option<&dyn RpcHandler> {
        self.handlers.get(&tag).map(|handler| handler.as_ref())
    }

    pub fn tags(&self) -> impl Iterator<Item = RpcTag> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for RpcKinds {
    fn default() -> Self {
        Self::new()
    }
}
