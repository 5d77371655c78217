//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common mock-bus setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::{Mutex, PoisonError};

use crate::Error;
use crate::bus::SharedMockBus;
use crate::constants::{READY_BIT, RX_BUF_LEN};
use crate::protocol::{Frame, StdFrameSizer};
use crate::transport::{CompletionSink, Session};

/// Completion sink that records every delivery for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Frames delivered via `on_frame`, in order.
    pub frames: Mutex<Vec<Frame>>,
    /// Reasons delivered via `on_cancelled`, in order.
    pub cancellations: Mutex<Vec<Error>>,
}

impl RecordingSink {
    /// Number of frames delivered so far.
    pub fn frame_count(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of cancellations delivered so far.
    pub fn cancel_count(&self) -> usize {
        self.cancellations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl CompletionSink for RecordingSink {
    fn on_frame(&self, frame: Frame) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame);
    }

    fn on_cancelled(&self, reason: Error) {
        self.cancellations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reason);
    }
}

/// Build a raw bus response: ready status byte, then the frame, then zero
/// padding out to the full receive buffer length.
#[doc(hidden)]
pub fn ready_response(frame: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RX_BUF_LEN);
    buf.push(READY_BIT);
    buf.extend_from_slice(frame);
    buf.resize(RX_BUF_LEN, 0);
    buf
}

/// A full-length response whose status byte has the ready bit clear.
#[doc(hidden)]
pub fn not_ready_response() -> Vec<u8> {
    vec![0u8; RX_BUF_LEN]
}

/// Convenience: a session over a [`SharedMockBus`] with the standard frame
/// sizer and a fixed retry seed. Returns the session together with a mock
/// handle for scripting outcomes and inspecting traffic.
#[doc(hidden)]
pub fn session_with_mock() -> (Session, SharedMockBus) {
    let bus = SharedMockBus::new();
    let session = Session::with_retry_seed(Box::new(bus.clone()), Box::new(StdFrameSizer), 0);
    (session, bus)
}
