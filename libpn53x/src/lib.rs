// libpn53x-rs/libpn53x/src/lib.rs

//! libpn53x
//!
//! Frame transport for NXP PN532/PN533 NFC controllers attached over a
//! synchronous byte bus.
#![warn(missing_docs)]

pub mod bus;
pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
