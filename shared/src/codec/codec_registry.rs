use std::{any::Any, collections::HashMap, fmt, marker::PhantomData};

use log::warn;
use modnet_serde::{ByteReader, ByteWrite, Serde, SerdeErr};
use uuid::Uuid;

use crate::{
    codec::{
        arg::{Arg, NetValue},
        error::CodecError,
        guid::GuidCodec,
    },
    type_key::TypeKey,
    types::{PeerId, PlayerId},
};

/// Encodes and decodes values of one concrete type
pub trait Codec: Send + Sync + 'static {
    type Value: NetValue + Clone;

    fn encode(&self, value: &Self::Value, writer: &mut dyn ByteWrite);

    fn decode(&self, reader: &mut ByteReader) -> Result<Self::Value, SerdeErr>;
}

/// Codec for any type with a [`Serde`] implementation
pub struct SerdeCodec<T> {
    phantom: PhantomData<fn() -> T>,
}

impl<T> SerdeCodec<T> {
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serde + NetValue> Codec for SerdeCodec<T> {
    type Value = T;

    fn encode(&self, value: &T, writer: &mut dyn ByteWrite) {
        value.ser(writer);
    }

    fn decode(&self, reader: &mut ByteReader) -> Result<T, SerdeErr> {
        T::de(reader)
    }
}

trait ErasedCodec: Send + Sync {
    fn encode_any(&self, value: &dyn Any, writer: &mut dyn ByteWrite) -> Result<(), CodecError>;

    fn decode_arg(&self, reader: &mut ByteReader) -> Result<Arg, CodecError>;
}

struct CodecEntry<C: Codec> {
    codec: C,
}

impl<C: Codec> ErasedCodec for CodecEntry<C> {
    fn encode_any(&self, value: &dyn Any, writer: &mut dyn ByteWrite) -> Result<(), CodecError> {
        let Some(value) = value.downcast_ref::<C::Value>() else {
            return Err(CodecError::TypeMismatch {
                expected: std::any::type_name::<C::Value>(),
                found: "a different type",
            });
        };
        self.codec.encode(value, writer);
        Ok(())
    }

    fn decode_arg(&self, reader: &mut ByteReader) -> Result<Arg, CodecError> {
        let value = self.codec.decode(reader)?;
        Ok(Arg::new(value))
    }
}

/// Per-type encode/decode functions, looked up by exact runtime type
pub struct CodecRegistry {
    codecs: HashMap<TypeKey, Box<dyn ErasedCodec>>,
}

impl CodecRegistry {
    /// Creates a registry with no codecs at all
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in codecs: primitives, strings,
    /// player and peer ids, and 128-bit identifiers
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.add_builtin::<bool>();
        registry.add_builtin::<u8>();
        registry.add_builtin::<u16>();
        registry.add_builtin::<u32>();
        registry.add_builtin::<u64>();
        registry.add_builtin::<i8>();
        registry.add_builtin::<i16>();
        registry.add_builtin::<i32>();
        registry.add_builtin::<i64>();
        registry.add_builtin::<f32>();
        registry.add_builtin::<f64>();
        registry.add_builtin::<String>();
        registry.add_builtin::<PlayerId>();
        registry.add_builtin::<PeerId>();
        registry.codecs.insert(
            TypeKey::of::<Uuid>(),
            Box::new(CodecEntry { codec: GuidCodec }),
        );
        registry
    }

    fn add_builtin<T: Serde + NetValue>(&mut self) {
        self.codecs.insert(
            TypeKey::of::<T>(),
            Box::new(CodecEntry {
                codec: SerdeCodec::<T>::new(),
            }),
        );
    }

    /// Registers `codec` for its value type. A type keeps the first codec
    /// registered for it.
    pub fn add_codec<C: Codec>(&mut self, codec: C) -> Result<(), CodecError> {
        let key = TypeKey::of::<C::Value>();
        if self.codecs.contains_key(&key) {
            warn!("Refusing second codec for {}", key);
            return Err(CodecError::DuplicateCodec {
                type_name: key.name(),
            });
        }
        self.codecs.insert(key, Box::new(CodecEntry { codec }));
        Ok(())
    }

    pub fn add_serde<T: Serde + NetValue>(&mut self) -> Result<(), CodecError> {
        self.add_codec(SerdeCodec::<T>::new())
    }

    pub fn has_codec(&self, key: &TypeKey) -> bool {
        self.codecs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub fn encode(&self, arg: &Arg, writer: &mut dyn ByteWrite) -> Result<(), CodecError> {
        let key = arg.type_key();
        let codec = self.codecs.get(&key).ok_or(CodecError::NoCodec {
            type_name: key.name(),
        })?;
        codec.encode_any(arg.value().as_any(), writer)
    }

    pub fn decode(&self, key: &TypeKey, reader: &mut ByteReader) -> Result<Arg, CodecError> {
        let codec = self.codecs.get(key).ok_or(CodecError::NoCodec {
            type_name: key.name(),
        })?;
        codec.decode_arg(reader)
    }

    pub fn encode_value<T: 'static>(
        &self,
        value: &T,
        writer: &mut dyn ByteWrite,
    ) -> Result<(), CodecError> {
        let key = TypeKey::of::<T>();
        let codec = self.codecs.get(&key).ok_or(CodecError::NoCodec {
            type_name: key.name(),
        })?;
        codec.encode_any(value, writer)
    }

    pub fn decode_value<T: 'static>(&self, reader: &mut ByteReader) -> Result<T, CodecError> {
        let key = TypeKey::of::<T>();
        let arg = self.decode(&key, reader)?;
        let found = arg.type_key().name();
        arg.take::<T>().ok_or(CodecError::TypeMismatch {
            expected: key.name(),
            found,
        })
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.codecs.keys()).finish()
    }
}
