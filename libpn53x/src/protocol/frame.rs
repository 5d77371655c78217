// libpn53x-rs/libpn53x/src/protocol/frame.rs

use std::fmt;

use crate::constants::{
    EXT_FRAME_HEADER_LEN, EXT_FRAME_MARKER, FRAME_POSTAMBLE, FRAME_PREAMBLE, FRAME_START,
    STD_FRAME_HEADER_LEN, STD_FRAME_TAIL_LEN,
};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Compute the Length Checksum (LCS)
/// LCS = 0x100 - LEN (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute the Data Checksum (DCS) over TFI + payload
/// DCS = 0x100 - (sum(data) & 0xff)
pub fn dcs(data: &[u8]) -> u8 {
    let sum = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// Reports how many bytes at the start of a receive buffer constitute one
/// complete frame, header and tail included.
///
/// The transport consults this after stripping the ready-status byte and
/// truncates its over-allocated buffer to the answer. Implementations must
/// never report more than `buf.len()`.
pub trait FrameSizer {
    /// Total length of the frame at the start of `buf`.
    fn rx_frame_size(&self, buf: &[u8]) -> usize;
}

/// Frame sizer for the chip's standard and extended information frames.
///
/// Standard frame: `00 00 FF LEN LCS TFI .. DCS 00`, LEN counting TFI +
/// payload. Extended frame: `00 00 FF FF FF LENM LENL LCS TFI .. DCS 00`
/// with a big-endian 16-bit length.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFrameSizer;

impl FrameSizer for StdFrameSizer {
    fn rx_frame_size(&self, buf: &[u8]) -> usize {
        if buf.len() < STD_FRAME_HEADER_LEN {
            return buf.len();
        }
        let total = if buf[3..5] == EXT_FRAME_MARKER {
            if buf.len() < EXT_FRAME_HEADER_LEN {
                return buf.len();
            }
            let len = u16::from_be_bytes([buf[5], buf[6]]) as usize;
            EXT_FRAME_HEADER_LEN + len + STD_FRAME_TAIL_LEN
        } else {
            STD_FRAME_HEADER_LEN + buf[3] as usize + STD_FRAME_TAIL_LEN
        };
        total.min(buf.len())
    }
}

/// An owned wire frame, stored without the leading ready-status byte.
///
/// The transport treats frames as opaque; the codec helpers here exist so
/// callers and tests can produce and pick apart real traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// Wrap raw frame bytes as received from the bus.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Encode a standard information frame around `tfi` + `payload`.
    ///
    /// LEN counts the TFI, so `payload` may hold at most 254 bytes.
    pub fn encode_std(tfi: u8, payload: &[u8]) -> Result<Self> {
        if payload.len() > 254 {
            return Err(Error::InvalidLength {
                expected: 254,
                actual: payload.len(),
            });
        }

        let len = (payload.len() + 1) as u8;
        let mut out =
            Vec::with_capacity(STD_FRAME_HEADER_LEN + len as usize + STD_FRAME_TAIL_LEN);
        out.push(FRAME_PREAMBLE);
        out.extend_from_slice(&FRAME_START);
        out.push(len);
        out.push(lcs(len));
        out.push(tfi);
        out.extend_from_slice(payload);
        let checksum = dcs(&out[STD_FRAME_HEADER_LEN..]);
        out.push(checksum);
        out.push(FRAME_POSTAMBLE);
        Ok(Self { bytes: out })
    }

    /// Raw frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the frame, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Frame length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the frame holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the frame starts with the fixed ACK sequence.
    pub fn is_ack(&self) -> bool {
        self.bytes.starts_with(&crate::constants::ACK_FRAME)
    }

    /// Check structure and checksums of a standard information frame.
    ///
    /// ACK frames carry no LEN/DCS pair and are recognized with
    /// [`Frame::is_ack`] instead.
    pub fn validate(&self) -> Result<()> {
        let b = &self.bytes;
        let min = STD_FRAME_HEADER_LEN + 1 + STD_FRAME_TAIL_LEN;
        if b.len() < min {
            return Err(Error::InvalidLength {
                expected: min,
                actual: b.len(),
            });
        }

        if b[0] != FRAME_PREAMBLE || b[1..3] != FRAME_START {
            return Err(Error::FrameFormat("invalid start sequence".into()));
        }

        let len = b[3];
        if b[4] != lcs(len) {
            return Err(Error::ChecksumMismatch {
                expected: lcs(len),
                actual: b[4],
            });
        }

        let required = STD_FRAME_HEADER_LEN + len as usize + STD_FRAME_TAIL_LEN;
        if b.len() != required {
            return Err(Error::InvalidLength {
                expected: required,
                actual: b.len(),
            });
        }

        let data = &b[STD_FRAME_HEADER_LEN..STD_FRAME_HEADER_LEN + len as usize];
        let checksum = b[STD_FRAME_HEADER_LEN + len as usize];
        if checksum != dcs(data) {
            return Err(Error::ChecksumMismatch {
                expected: dcs(data),
                actual: checksum,
            });
        }

        if b[required - 1] != FRAME_POSTAMBLE {
            return Err(Error::FrameFormat("invalid postamble".into()));
        }

        Ok(())
    }

    /// TFI + payload bytes of a validated standard frame.
    pub fn payload(&self) -> Result<&[u8]> {
        self.validate()?;
        let len = self.bytes[3] as usize;
        Ok(&self.bytes[STD_FRAME_HEADER_LEN..STD_FRAME_HEADER_LEN + len])
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_to_hex_spaced(&self.bytes))
    }
}
