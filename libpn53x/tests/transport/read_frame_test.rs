#[path = "../common/mod.rs"]
mod common;

use libpn53x::constants::RX_BUF_LEN;
use libpn53x::protocol::dcs;
use libpn53x::test_support::{not_ready_response, ready_response, session_with_mock};
use libpn53x::{BusError, Error};

#[test]
fn ready_frame_is_stripped_and_trimmed() {
    let (session, bus) = session_with_mock();
    let response = common::firmware_response();
    bus.lock().push_read(ready_response(response.as_bytes()));

    let frame = session.read_frame().unwrap();
    assert_eq!(frame, response);
    frame.validate().unwrap();
    assert_eq!(frame.payload().unwrap()[0], 0xD5);
}

#[test]
fn clear_ready_bit_means_device_busy() {
    let (session, bus) = session_with_mock();
    bus.lock().push_read(not_ready_response());

    let err = session.read_frame().unwrap_err();
    assert!(matches!(err, Error::DeviceBusy));
}

#[test]
fn ready_bit_is_bit_zero_of_the_status_byte() {
    let (session, bus) = session_with_mock();
    // Other status bits set, ready bit clear: still busy
    let mut raw = not_ready_response();
    raw[0] = 0xFE;
    bus.lock().push_read(raw);

    assert!(matches!(session.read_frame(), Err(Error::DeviceBusy)));
}

#[test]
fn short_read_maps_to_remote_io() {
    let (session, bus) = session_with_mock();
    bus.lock().push_read(vec![0x01; RX_BUF_LEN / 2]);

    let err = session.read_frame().unwrap_err();
    assert!(matches!(err, Error::RemoteIo));
}

#[test]
fn bus_read_errors_pass_through() {
    let (session, bus) = session_with_mock();
    bus.lock()
        .push_read_err(BusError::Transfer("lost arbitration".into()));

    let err = session.read_frame().unwrap_err();
    assert!(matches!(err, Error::Bus(BusError::Transfer(_))));
}

#[test]
fn extended_frames_trim_by_16bit_length() {
    // 00 00 FF FF FF LENM LENL LCS TFI data.. DCS 00, LEN counting TFI
    let data: Vec<u8> = std::iter::once(0xD5)
        .chain((0..9).map(|i| i as u8))
        .collect();
    let mut raw = vec![0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x0A, 0xF6];
    raw.extend_from_slice(&data);
    raw.push(dcs(&data));
    raw.push(0x00);
    let total = raw.len();

    let (session, bus) = session_with_mock();
    bus.lock().push_read(ready_response(&raw));

    let frame = session.read_frame().unwrap();
    assert_eq!(frame.len(), total);
    assert_eq!(frame.as_bytes(), &raw[..]);
}

#[test]
fn consecutive_reads_return_queued_frames_in_order() {
    let (session, bus) = session_with_mock();
    let first = common::filler_response(0x11, 4);
    let second = common::filler_response(0x22, 8);
    {
        let mut mock = bus.lock();
        mock.push_read(ready_response(first.as_bytes()));
        mock.push_read(ready_response(second.as_bytes()));
    }

    assert_eq!(session.read_frame().unwrap(), first);
    assert_eq!(session.read_frame().unwrap(), second);
}
