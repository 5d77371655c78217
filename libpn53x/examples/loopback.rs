//! Drive a full command/response exchange against the in-crate mock bus.
//!
//! Run with `RUST_LOG=debug cargo run --example loopback` to watch the
//! transport's logging.

use anyhow::Result;
use libpn53x::prelude::*;
use libpn53x::test_support::{RecordingSink, ready_response};

fn main() -> Result<()> {
    env_logger::init();

    let bus = SharedMockBus::new();
    let session = Session::new(Box::new(bus.clone()), Box::new(StdFrameSizer));

    // GetFirmwareVersion, the shortest real exchange the chip supports
    let command = Frame::encode_std(0xD4, &[0x02])?;
    let response = Frame::encode_std(0xD5, &[0x03, 0x32, 0x01, 0x06, 0x07])?;
    bus.lock().push_read(ready_response(response.as_bytes()));

    session.send_frame(command.as_bytes())?;

    let sink = RecordingSink::default();
    session.recv_frame(&sink)?;

    for frame in sink.frames.lock().unwrap().iter() {
        println!("response frame: {}", frame);
        println!("tfi + payload:  {}", bytes_to_hex_spaced(frame.payload()?));
    }

    Ok(())
}
