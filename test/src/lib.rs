pub mod helpers;
pub mod test_protocol;

pub use helpers::*;
pub use test_protocol::{
    protocol, protocol_without_modifiers, reset_verify_calls, verify_calls, Bounty, Marked,
    NeverWins, Stacked, Triumph, TestExtension,
};
