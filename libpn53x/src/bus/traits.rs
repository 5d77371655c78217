// libpn53x-rs/libpn53x/src/bus/traits.rs

use crate::error::BusError;

/// BusLink abstracts the synchronous byte bus away from the transport
/// logic.
///
/// The adapter behind it (SPI, I2C, a test double) is brought up by the
/// caller before a session is created; the transport only needs these two
/// blocking operations. Both report the number of bytes actually moved —
/// the transport decides whether a short transfer is an error.
pub trait BusLink {
    /// Write raw bytes to the device in one bus transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, BusError>;

    /// Read into `buf` in one bus transaction.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError>;
}
