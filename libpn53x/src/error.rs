// libpn53x-rs/libpn53x/src/error.rs

use thiserror::Error;

use crate::types::FaultCode;

/// Error produced by a [`BusLink`](crate::bus::BusLink) implementation.
///
/// The transport only cares about one distinction: [`BusError::PowerDown`]
/// drives the retry-once policy on the command-send path, everything else is
/// surfaced unmodified.
#[derive(Error, Debug, Clone)]
pub enum BusError {
    /// The chip was in a power-saving state when addressed and did not
    /// respond.
    #[error("device in power-down")]
    PowerDown,

    /// Any other transfer failure on the physical link.
    #[error("bus transfer failed: {0}")]
    Transfer(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// A permanent hardware fault was recorded for this session; every send
    /// fails fast with it until the session is torn down.
    #[error("hard fault {0}, transport disabled")]
    HardFault(FaultCode),

    /// A bus transfer moved fewer bytes than requested.
    #[error("remote i/o error: transfer truncated")]
    RemoteIo,

    /// The chip has not asserted the ready flag yet; retry the read later.
    #[error("device busy: ready flag not set")]
    DeviceBusy,

    /// The outstanding command was cancelled before its response arrived.
    #[error("command cancelled")]
    Cancelled,

    /// Command frames must contain at least one byte.
    #[error("empty command frame")]
    EmptyFrame,

    /// The receive buffer could not be allocated. Fatal for this single
    /// operation only.
    #[error("receive buffer allocation failed")]
    Alloc,

    /// A frame or payload had the wrong length for its format.
    #[error("invalid frame length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Length required by the frame format
        expected: usize,
        /// Length actually seen
        actual: usize,
    },

    /// LCS or DCS did not match the frame content.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Checksum the frame content requires
        expected: u8,
        /// Checksum carried by the frame
        actual: u8,
    },

    /// Malformed frame structure (preamble, start code, postamble)
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// Raw bus error passed through from the link layer.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
