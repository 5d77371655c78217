// libpn53x-rs/libpn53x/src/constants.rs
//! Wire-format constants shared across the crate

/// ACK frame: preamble, start-of-packet code, ACK code, postamble.
/// Written by the host, it cancels the command currently executing in the
/// chip.
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Frame preamble byte
pub const FRAME_PREAMBLE: u8 = 0x00;

/// Start-of-packet code following the preamble
pub const FRAME_START: [u8; 2] = [0x00, 0xFF];

/// Frame postamble byte
pub const FRAME_POSTAMBLE: u8 = 0x00;

/// Standard information frame header: preamble + start code + LEN + LCS
pub const STD_FRAME_HEADER_LEN: usize = 5;

/// Extended information frame header: preamble + start code + extended
/// marker + 16-bit LEN + LCS
pub const EXT_FRAME_HEADER_LEN: usize = 8;

/// Frame tail: DCS + postamble
pub const STD_FRAME_TAIL_LEN: usize = 2;

/// Maximum payload carried by a single response frame
pub const STD_FRAME_MAX_PAYLOAD_LEN: usize = 263;

/// Marker in the LEN/LCS slots announcing an extended information frame
pub const EXT_FRAME_MARKER: [u8; 2] = [0xFF, 0xFF];

/// Bit 0 of the status byte prefixed to every response read; the chip sets
/// it once data is available.
pub const READY_BIT: u8 = 0x01;

/// Size of the receive buffer handed to the bus: one ready-status byte
/// followed by the largest possible frame.
pub const RX_BUF_LEN: usize =
    EXT_FRAME_HEADER_LEN + STD_FRAME_MAX_PAYLOAD_LEN + STD_FRAME_TAIL_LEN + 1;
