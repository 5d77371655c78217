// libpn53x-rs/libpn53x/src/transport/mod.rs

pub mod backoff;
pub mod command;
pub mod session;

pub use backoff::RetryDelay;
pub use command::{CommandState, CompletionSink};
pub use session::Session;
