use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

/// Upper bound on the encoded size of a packed `u64`
pub const MAX_PACKED_BYTES: usize = 10;

const GROUP_BITS: u32 = 7;
const GROUP_MASK: u64 = 0x7f;
const CONTINUE_FLAG: u8 = 0x80;

// Packed integers are written as little-endian groups of 7 bits. The high bit
// of each byte is set when another group follows, so values below 128 take a
// single byte.

pub fn write_packed(writer: &mut dyn ByteWrite, value: u64) {
    if writer.is_counter() {
        writer.count_bytes(packed_length(value));
        return;
    }

    let mut value = value;
    loop {
        let mut byte = (value & GROUP_MASK) as u8;
        value >>= GROUP_BITS;
        if value != 0 {
            byte |= CONTINUE_FLAG;
        }
        writer.write_byte(byte);
        if value == 0 {
            return;
        }
    }
}

pub fn read_packed(reader: &mut ByteReader) -> Result<u64, SerdeErr> {
    let mut output: u64 = 0;

    for index in 0..MAX_PACKED_BYTES {
        let byte = reader.read_byte()?;
        let group = u64::from(byte) & GROUP_MASK;

        // the tenth group only has room for the top bit of a u64
        if index == MAX_PACKED_BYTES - 1 && group > 1 {
            return Err(SerdeErr::PackedOverflow {
                max_bytes: MAX_PACKED_BYTES,
            });
        }

        output |= group << (GROUP_BITS * index as u32);

        if byte & CONTINUE_FLAG == 0 {
            if index > 0 && byte == 0 {
                return Err(SerdeErr::OverlongPacked);
            }
            return Ok(output);
        }
    }

    Err(SerdeErr::PackedOverflow {
        max_bytes: MAX_PACKED_BYTES,
    })
}

/// Reads a packed length and checks it against `max`
pub fn read_packed_usize(reader: &mut ByteReader, max: usize) -> Result<usize, SerdeErr> {
    let value = read_packed(reader)?;
    let length = usize::try_from(value).map_err(|_| SerdeErr::OutOfRange {
        value: i128::from(value),
        type_name: "usize",
    })?;
    if length > max {
        return Err(SerdeErr::LengthOverLimit { length, max });
    }
    Ok(length)
}

pub fn write_packed_signed(writer: &mut dyn ByteWrite, value: i64) {
    write_packed(writer, zigzag_encode(value));
}

pub fn read_packed_signed(reader: &mut ByteReader) -> Result<i64, SerdeErr> {
    Ok(zigzag_decode(read_packed(reader)?))
}

pub fn packed_length(value: u64) -> usize {
    let significant_bits = 64 - value.leading_zeros() as usize;
    significant_bits.max(1).div_ceil(GROUP_BITS as usize)
}

pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

macro_rules! impl_packed_unsigned {
    ($($t:ty),*) => {$(
        impl Serde for $t {
            fn ser(&self, writer: &mut dyn ByteWrite) {
                write_packed(writer, u64::from(*self));
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                let value = read_packed(reader)?;
                <$t>::try_from(value).map_err(|_| SerdeErr::OutOfRange {
                    value: i128::from(value),
                    type_name: stringify!($t),
                })
            }

            fn byte_length(&self) -> usize {
                packed_length(u64::from(*self))
            }
        }
    )*};
}

macro_rules! impl_packed_signed {
    ($($t:ty),*) => {$(
        impl Serde for $t {
            fn ser(&self, writer: &mut dyn ByteWrite) {
                write_packed_signed(writer, i64::from(*self));
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                let value = read_packed_signed(reader)?;
                <$t>::try_from(value).map_err(|_| SerdeErr::OutOfRange {
                    value: i128::from(value),
                    type_name: stringify!($t),
                })
            }

            fn byte_length(&self) -> usize {
                packed_length(zigzag_encode(i64::from(*self)))
            }
        }
    )*};
}

impl_packed_unsigned!(u16, u32, u64);
impl_packed_signed!(i16, i32, i64);

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl Serde for i8 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.to_le_bytes()[0]);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(i8::from_le_bytes([reader.read_byte()?]))
    }

    fn byte_length(&self) -> usize {
        1
    }
}

// Tests
