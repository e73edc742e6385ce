pub mod assertions;
pub mod event_log;
pub mod host_relay;
pub mod test_transport;

pub use event_log::{record, take_events, Event};
pub use host_relay::HostRelay;
pub use test_transport::{test_session, RecordingTransport, TestSession};
