// libpn53x-rs/libpn53x/src/bus/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{MockBus, SharedMockBus, WriteOutcome};
pub use traits::BusLink;
