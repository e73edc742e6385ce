use modnet_serde::{read_packed_usize, write_block, ByteReader, ByteWrite, SerdeErr};
use uuid::Uuid;

use crate::codec::codec_registry::Codec;

pub const GUID_LENGTH: usize = 16;

/// Encodes a 128-bit identifier as its raw bytes behind a packed length
/// marker, so a wider identifier can be introduced later without breaking the
/// framing of older peers
pub struct GuidCodec;

impl Codec for GuidCodec {
    type Value = Uuid;

    fn encode(&self, value: &Uuid, writer: &mut dyn ByteWrite) {
        write_block(writer, value.as_bytes());
    }

    fn decode(&self, reader: &mut ByteReader) -> Result<Uuid, SerdeErr> {
        let length = read_packed_usize(reader, usize::MAX)?;
        if length != GUID_LENGTH {
            return Err(SerdeErr::LengthMismatch {
                expected: GUID_LENGTH,
                actual: length,
            });
        }
        Ok(Uuid::from_bytes(reader.read_array::<GUID_LENGTH>()?))
    }
}
