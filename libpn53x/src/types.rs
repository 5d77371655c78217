// libpn53x-rs/libpn53x/src/types.rs

use derive_more::Display;

/// ハードフォールトコード - Newtype Pattern
///
/// Persistent fault code recorded against a session by bus-initialization
/// code. Zero means "no fault" and is rejected at construction, so a stored
/// `FaultCode` always denotes a real failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct FaultCode(i32);

impl FaultCode {
    /// Wrap a raw fault code. Returns `None` for zero.
    pub fn new(code: i32) -> Option<Self> {
        if code == 0 { None } else { Some(Self(code)) }
    }

    /// The raw code as recorded.
    pub fn code(&self) -> i32 {
        self.0
    }
}
