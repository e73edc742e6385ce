pub mod arg;
pub mod codec_registry;
pub mod error;
pub mod guid;
