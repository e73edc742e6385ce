use modnet_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

pub type OutcomeId = u32;
pub type ModifierTypeId = u32;

/// A connected client of the session, as numbered by the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(pub u32);

/// A player slot in the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl Serde for PeerId {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn byte_length(&self) -> usize {
        self.0.byte_length()
    }
}

impl Serde for PlayerId {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.0);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(reader.read_byte()?))
    }

    fn byte_length(&self) -> usize {
        1
    }
}
