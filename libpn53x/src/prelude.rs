// libpn53x-rs/libpn53x/src/prelude.rs

pub use crate::bus::{BusLink, MockBus, SharedMockBus};
pub use crate::protocol::{Frame, FrameSizer, StdFrameSizer};
pub use crate::transport::{CommandState, CompletionSink, RetryDelay, Session};
pub use crate::{BusError, Error, FaultCode, Result};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
