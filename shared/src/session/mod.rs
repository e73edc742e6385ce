pub mod host_authority;
pub mod modifier_component;
pub mod peer_session;
pub mod state;
pub mod transport;
