//! # Modnet Serde
//! Byte-oriented wire primitives: packed integers, length-prefixed blocks and
//! the [`Serde`] trait implemented for the value types carried by modnet RPCs.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod block;
mod byte_reader;
mod byte_writer;
mod error;
mod integer;
mod serde;

pub use block::{read_block, write_block};
pub use byte_reader::ByteReader;
pub use byte_writer::{ByteCounter, ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use integer::{
    packed_length, read_packed, read_packed_signed, read_packed_usize, write_packed,
    write_packed_signed, zigzag_decode, zigzag_encode, MAX_PACKED_BYTES,
};
pub use serde::{Serde, DEFAULT_MAX_LENGTH};
