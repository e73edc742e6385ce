pub mod custom_rpc;
pub mod data;
pub mod envelope;
pub mod error;
pub mod game_over_rpc;
pub mod modifier_rpc;
pub mod rpc_kinds;
