use log::info;
use modnet_serde::{ByteReader, ByteWrite, Serde};

use crate::{
    codec::{
        arg::{Arg, NetValue},
        codec_registry::{Codec, CodecRegistry},
    },
    config::ProtocolConfig,
    registry::{
        error::RegistryError,
        modifier::{ModifierConstructors, ModifierRegistry},
        outcome::{GameOutcome, OutcomeRegistry},
        type_ref::{ModifierRef, OutcomeRef},
    },
    rpc::{
        custom_rpc::CustomRpc,
        error::RpcError,
        game_over_rpc::GameOverRpc,
        modifier_rpc::{AddModifierRpc, RemoveModifierRpc},
        rpc_kinds::RpcKinds,
    },
    type_key::TypeKey,
    types::{ModifierTypeId, OutcomeId},
};

pub mod error;
pub use error::ProtocolError;

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
/// Everything peers must agree on: codecs, registered extension types and
/// the RPC table
///
/// Extensions contribute to it while it is unlocked. Once locked it is read
/// only and is shared with every session, typically behind an `Arc`.
pub struct Protocol {
    config: ProtocolConfig,
    codecs: CodecRegistry,
    outcomes: OutcomeRegistry,
    modifiers: ModifierRegistry,
    rpc_kinds: RpcKinds,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self::with_config(ProtocolConfig::default())
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Creates a Protocol holding the built-in codecs and RPCs
    pub fn with_config(config: ProtocolConfig) -> Self {
        let mut rpc_kinds = RpcKinds::new();
        let builtin = [
            rpc_kinds.add_rpc(AddModifierRpc),
            rpc_kinds.add_rpc(RemoveModifierRpc),
            rpc_kinds.add_rpc(GameOverRpc),
        ];
        debug_assert!(builtin.iter().all(Result::is_ok));

        Self {
            codecs: CodecRegistry::new(),
            outcomes: OutcomeRegistry::outcomes(),
            modifiers: ModifierRegistry::modifiers(config.modifier_id_offset),
            rpc_kinds,
            config,
            locked: false,
        }
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    /// Registers an outcome type. Returns false, and logs why, if it is
    /// refused.
    pub fn register_outcome_type<T: GameOutcome + Default>(&mut self) -> bool {
        self.outcomes.register_outcome::<T>()
    }

    /// Registers a modifier type. Returns false, and logs why, if it is
    /// refused.
    pub fn register_modifier_type<M: ModifierConstructors>(&mut self) -> bool {
        self.modifiers.register_modifier::<M>()
    }

    /// Adds a codec for an argument type
    ///
    /// # Panics
    ///
    /// Panics if the Protocol is locked or the type already has a codec.
    /// Consider using `try_add_codec` for non-panicking error handling.
    pub fn add_codec<C: Codec>(&mut self, codec: C) -> &mut Self {
        self.check_lock();
        if let Err(error) = self.codecs.add_codec(codec) {
            panic!("{}", error);
        }
        self
    }

    /// Adds a codec for an argument type with a [`Serde`] implementation
    ///
    /// # Panics
    ///
    /// Panics if the Protocol is locked or the type already has a codec.
    pub fn add_serde<T: Serde + NetValue>(&mut self) -> &mut Self {
        self.check_lock();
        if let Err(error) = self.codecs.add_serde::<T>() {
            panic!("{}", error);
        }
        self
    }

    /// Adds an RPC to the dispatch table
    ///
    /// # Panics
    ///
    /// Panics if the Protocol is locked or another RPC uses the same tag.
    pub fn add_rpc<R: CustomRpc>(&mut self, rpc: R) -> &mut Self {
        self.check_lock();
        if let Err(error) = self.rpc_kinds.add_rpc(rpc) {
            panic!("{}", error);
        }
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_register_outcome_type<T: GameOutcome + Default>(
        &mut self,
    ) -> Result<OutcomeId, RegistryError> {
        self.outcomes.try_register_outcome::<T>()
    }

    pub fn try_register_modifier_type<M: ModifierConstructors>(
        &mut self,
    ) -> Result<ModifierTypeId, RegistryError> {
        self.modifiers.try_register_modifier::<M>()
    }

    pub fn try_add_codec<C: Codec>(&mut self, codec: C) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.codecs.add_codec(codec)?;
        Ok(self)
    }

    pub fn try_add_serde<T: Serde + NetValue>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.codecs.add_serde::<T>()?;
        Ok(self)
    }

    pub fn try_add_rpc<R: CustomRpc>(&mut self, rpc: R) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.rpc_kinds.add_rpc(rpc)?;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.lock_registries();
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.lock_registries();
    }

    fn lock_registries(&mut self) {
        self.outcomes.lock();
        self.modifiers.lock();
        self.locked = true;
        info!(
            "Protocol locked: {} outcome type(s), {} modifier type(s), {} codec(s), {} RPC(s)",
            self.outcomes.len(),
            self.modifiers.len(),
            self.codecs.len(),
            self.rpc_kinds.len()
        );
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    // Accessors

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    pub fn outcomes(&self) -> &OutcomeRegistry {
        &self.outcomes
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    pub fn rpc_kinds(&self) -> &RpcKinds {
        &self.rpc_kinds
    }

    // Arguments

    /// Writes one constructor argument. References to registered outcome
    /// and modifier types are written as their id, any other value goes
    /// through the codec for its runtime type.
    pub fn write_arg(&self, arg: &Arg, writer: &mut dyn ByteWrite) -> Result<(), RpcError> {
        if let Some(outcome) = arg.downcast_ref::<OutcomeRef>() {
            self.outcomes.try_id_of_key(&outcome.type_key())?.ser(writer);
            return Ok(());
        }
        if let Some(modifier) = arg.downcast_ref::<ModifierRef>() {
            self.modifiers.try_id_of_key(&modifier.type_key())?.ser(writer);
            return Ok(());
        }
        Ok(self.codecs.encode(arg, writer)?)
    }

    /// Reads one constructor argument declared as `ty`
    pub fn read_arg(&self, ty: &TypeKey, reader: &mut ByteReader) -> Result<Arg, RpcError> {
        if *ty == TypeKey::of::<OutcomeRef>() {
            let id = OutcomeId::de(reader)?;
            let key = self.outcomes.resolve(id).ok_or(RpcError::UnknownTypeRef {
                registry: self.outcomes.label(),
                id,
            })?;
            return Ok(Arg::new(OutcomeRef::from_key(key)));
        }
        if *ty == TypeKey::of::<ModifierRef>() {
            let id = ModifierTypeId::de(reader)?;
            let key = self.modifiers.resolve(id).ok_or(RpcError::UnknownTypeRef {
                registry: self.modifiers.label(),
                id,
            })?;
            return Ok(Arg::new(ModifierRef::from_key(key)));
        }
        Ok(self.codecs.decode(ty, reader)?)
    }
}
