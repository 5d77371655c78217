#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::thread;

use libpn53x::bus::WriteOutcome;
use libpn53x::constants::ACK_FRAME;
use libpn53x::test_support::{RecordingSink, ready_response, session_with_mock};
use libpn53x::transport::CommandState;
use libpn53x::{BusError, Error};

#[test]
fn abort_delivers_exactly_one_cancellation() {
    let (session, bus) = session_with_mock();
    let sink = RecordingSink::default();

    session.send_frame(&common::firmware_command()).unwrap();
    session.abort_cmd(&sink);

    assert_eq!(sink.cancel_count(), 1);
    assert_eq!(sink.frame_count(), 0);
    assert!(matches!(
        sink.cancellations.lock().unwrap()[0],
        Error::Cancelled
    ));
    assert_eq!(session.command_state(), CommandState::Completed);
    // The cancel rode an ACK onto the wire
    assert_eq!(bus.lock().pop_written().unwrap(), ACK_FRAME.to_vec());
}

#[test]
fn late_frame_after_abort_is_discarded() {
    let (session, bus) = session_with_mock();
    let sink = RecordingSink::default();

    session.send_frame(&common::firmware_command()).unwrap();
    session.abort_cmd(&sink);

    // The chip produced a response anyway; it lost the race.
    bus.lock()
        .push_read(ready_response(common::firmware_response().as_bytes()));
    session.recv_frame(&sink).unwrap();

    assert_eq!(sink.frame_count(), 0);
    assert_eq!(sink.cancel_count(), 1);
}

#[test]
fn abort_without_outstanding_command_is_noop() {
    let (session, bus) = session_with_mock();
    let sink = RecordingSink::default();

    session.abort_cmd(&sink);

    assert_eq!(sink.cancel_count(), 0);
    assert!(bus.lock().written.is_empty());
    assert_eq!(session.command_state(), CommandState::Idle);
}

#[test]
fn completed_command_cannot_be_aborted() {
    let (session, bus) = session_with_mock();
    let sink = RecordingSink::default();

    session.send_frame(&common::firmware_command()).unwrap();
    bus.lock()
        .push_read(ready_response(common::firmware_response().as_bytes()));
    session.recv_frame(&sink).unwrap();

    session.abort_cmd(&sink);

    assert_eq!(sink.frame_count(), 1);
    assert_eq!(sink.cancel_count(), 0);
}

#[test]
fn second_abort_is_noop() {
    let (session, _bus) = session_with_mock();
    let sink = RecordingSink::default();

    session.send_frame(&common::firmware_command()).unwrap();
    session.abort_cmd(&sink);
    session.abort_cmd(&sink);

    assert_eq!(sink.cancel_count(), 1);
}

#[test]
fn cancellation_reported_even_when_ack_write_fails() {
    let (session, bus) = session_with_mock();
    let sink = RecordingSink::default();

    session.send_frame(&common::firmware_command()).unwrap();
    bus.lock()
        .script_write(WriteOutcome::Fail(BusError::Transfer("nak".into())));
    session.abort_cmd(&sink);

    assert_eq!(sink.cancel_count(), 1);
    assert_eq!(sink.frame_count(), 0);
}

#[test]
fn racing_abort_and_completion_deliver_exactly_once() {
    for _ in 0..32 {
        let (session, bus) = session_with_mock();
        let session = Arc::new(session);
        let sink = Arc::new(RecordingSink::default());

        session.send_frame(&common::firmware_command()).unwrap();
        bus.lock()
            .push_read(ready_response(common::firmware_response().as_bytes()));

        let reader = {
            let session = Arc::clone(&session);
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                session.recv_frame(&*sink).unwrap();
            })
        };
        let aborter = {
            let session = Arc::clone(&session);
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                session.abort_cmd(&*sink);
            })
        };
        reader.join().unwrap();
        aborter.join().unwrap();

        assert_eq!(
            sink.frame_count() + sink.cancel_count(),
            1,
            "every command resolves to exactly one outcome"
        );
    }
}
