// libpn53x-rs/libpn53x/src/bus/mock.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::bus::traits::BusLink;
use crate::error::BusError;

/// Scripted result for one `write` call on [`MockBus`].
#[derive(Debug, Clone)]
pub enum WriteOutcome {
    /// Report the full requested length (the default when nothing is
    /// scripted).
    Full,
    /// Report a short write of this many bytes.
    Short(usize),
    /// Fail the write with this bus error.
    Fail(BusError),
}

/// Mock bus for unit tests. It records written payloads (with timestamps,
/// so retry gaps can be asserted) and replays scripted outcomes.
#[derive(Debug, Default)]
pub struct MockBus {
    /// Every payload passed to `write`, in order.
    pub written: Vec<Vec<u8>>,
    /// `Instant` of each `write` call, index-aligned with `written`.
    pub write_times: Vec<Instant>,
    write_script: VecDeque<WriteOutcome>,
    read_script: VecDeque<Result<Vec<u8>, BusError>>,
}

impl MockBus {
    /// New mock with no scripted outcomes: writes succeed in full, reads
    /// fail until a response is queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome of the next unscripted `write` call.
    pub fn script_write(&mut self, outcome: WriteOutcome) {
        self.write_script.push_back(outcome);
    }

    /// Queue bytes for a `read` call to return.
    pub fn push_read(&mut self, bytes: Vec<u8>) {
        self.read_script.push_back(Ok(bytes));
    }

    /// Queue a failure for a `read` call.
    pub fn push_read_err(&mut self, err: BusError) {
        self.read_script.push_back(Err(err));
    }

    /// Remove and return the most recently written payload.
    pub fn pop_written(&mut self) -> Option<Vec<u8>> {
        self.written.pop()
    }
}

impl BusLink for MockBus {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, BusError> {
        self.written.push(bytes.to_vec());
        self.write_times.push(Instant::now());
        match self.write_script.pop_front() {
            None | Some(WriteOutcome::Full) => Ok(bytes.len()),
            Some(WriteOutcome::Short(n)) => Ok(n),
            Some(WriteOutcome::Fail(e)) => Err(e),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        match self.read_script.pop_front() {
            None => Err(BusError::Transfer("no queued response".into())),
            Some(Err(e)) => Err(e),
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
        }
    }
}

/// Cloneable handle to a [`MockBus`] behind `Arc<Mutex<..>>`.
///
/// A session takes exclusive ownership of its bus handle, so tests hand it
/// one clone and keep another to script outcomes and inspect traffic.
#[derive(Debug, Default, Clone)]
pub struct SharedMockBus(Arc<Mutex<MockBus>>);

impl SharedMockBus {
    /// New shared mock around a default [`MockBus`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the underlying mock for scripting or inspection.
    pub fn lock(&self) -> MutexGuard<'_, MockBus> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BusLink for SharedMockBus {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, BusError> {
        self.lock().write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        self.lock().read(buf)
    }
}
