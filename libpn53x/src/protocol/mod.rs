// libpn53x-rs/libpn53x/src/protocol/mod.rs

pub mod frame;

pub use frame::{Frame, FrameSizer, StdFrameSizer, dcs, lcs};
