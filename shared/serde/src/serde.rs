use crate::{
    byte_reader::ByteReader,
    byte_writer::{ByteCounter, ByteWrite},
    error::SerdeErr,
    integer::{packed_length, read_packed_usize, write_packed},
};

/// Upper bound on decoded string and sequence lengths when no tighter limit
/// is supplied by the caller
pub const DEFAULT_MAX_LENGTH: usize = u16::MAX as usize;

/// A value with a fixed wire encoding
pub trait Serde: Sized + Clone + PartialEq {
    fn ser(&self, writer: &mut dyn ByteWrite);

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    fn byte_length(&self) -> usize {
        let mut counter = ByteCounter::new();
        self.ser(&mut counter);
        counter.byte_count()
    }
}

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(SerdeErr::InvalidBool { byte }),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl Serde for f32 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(f32::from_le_bytes(reader.read_array()?))
    }

    fn byte_length(&self) -> usize {
        4
    }
}

impl Serde for f64 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(f64::from_le_bytes(reader.read_array()?))
    }

    fn byte_length(&self) -> usize {
        8
    }
}

impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        write_packed(writer, self.len() as u64);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = read_packed_usize(reader, DEFAULT_MAX_LENGTH)?;
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerdeErr::InvalidUtf8)
    }

    fn byte_length(&self) -> usize {
        packed_length(self.len() as u64) + self.len()
    }
}

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        match self {
            Some(value) => {
                writer.write_byte(1);
                value.ser(writer);
            }
            None => writer.write_byte(0),
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(None),
            1 => Ok(Some(T::de(reader)?)),
            tag => Err(SerdeErr::InvalidOptionTag { tag }),
        }
    }
}

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        write_packed(writer, self.len() as u64);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = read_packed_usize(reader, DEFAULT_MAX_LENGTH)?;
        // every element takes at least one byte
        if length > reader.remaining() {
            return Err(SerdeErr::UnexpectedEof {
                needed: length,
                remaining: reader.remaining(),
            });
        }
        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }
}
