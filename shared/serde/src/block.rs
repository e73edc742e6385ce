use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    integer::{read_packed_usize, write_packed},
};

/// Writes `bytes` prefixed by their packed length
pub fn write_block(writer: &mut dyn ByteWrite, bytes: &[u8]) {
    write_packed(writer, bytes.len() as u64);
    writer.write_bytes(bytes);
}

/// Reads a length-prefixed block of at most `max` bytes
pub fn read_block<'b>(reader: &mut ByteReader<'b>, max: usize) -> Result<&'b [u8], SerdeErr> {
    let length = read_packed_usize(reader, max)?;
    reader.read_bytes(length)
}
