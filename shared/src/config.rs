use std::default::Default;

/// Contains Config properties shared by every peer using a Protocol
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// First numeric id handed out by the modifier registry. Ids below it are
    /// reserved for modifiers built into the host application. The default
    /// of 0 reserves nothing, for hosts without built-in modifiers.
    pub modifier_id_offset: u32,
    /// Maximum number of elements accepted when decoding a sequence, such as
    /// the winners of a game over or the arguments of a modifier
    pub max_sequence_length: usize,
    /// Maximum size in bytes of a length-prefixed block read from the wire
    pub max_block_length: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            modifier_id_offset: 0,
            max_sequence_length: 255,
            max_block_length: 32_000,
        }
    }
}
