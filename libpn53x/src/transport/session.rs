// libpn53x-rs/libpn53x/src/transport/session.rs

//! One physical-link session and its frame transport state machine.

use std::sync::{Mutex, MutexGuard, OnceLock};
use std::thread;

use log::{debug, error, warn};

use crate::bus::BusLink;
use crate::constants::{ACK_FRAME, READY_BIT, RX_BUF_LEN};
use crate::error::BusError;
use crate::protocol::{Frame, FrameSizer};
use crate::transport::backoff::RetryDelay;
use crate::transport::command::{CommandState, CompletionSink};
use crate::types::FaultCode;
use crate::{Error, Result};

/// Bus handle plus the retry jitter that paces its recovery writes. Kept
/// under one lock so the pause between the two write attempts happens with
/// the bus held.
struct BusState {
    link: Box<dyn BusLink + Send>,
    delay: RetryDelay,
}

/// One physical-link session: exclusively owned bus handle, the permanent
/// hard-fault latch, and the state of the single outstanding command.
///
/// The session never queues or pipelines: one command frame is in flight at
/// a time, and the caller serializes `send_frame` / `recv_frame` for
/// successive commands. `abort_cmd` is the exception — it may run from
/// another thread against an in-flight read, and the command state lock
/// decides which of the two reaches the [`CompletionSink`].
pub struct Session {
    bus: Mutex<BusState>,
    state: Mutex<CommandState>,
    hard_fault: OnceLock<FaultCode>,
    sizer: Box<dyn FrameSizer + Send + Sync>,
}

impl Session {
    /// Create a session over an established bus link.
    pub fn new(bus: Box<dyn BusLink + Send>, sizer: Box<dyn FrameSizer + Send + Sync>) -> Self {
        Self::with_delay(bus, sizer, RetryDelay::new())
    }

    /// Create a session whose retry jitter is seeded, for deterministic
    /// tests.
    pub fn with_retry_seed(
        bus: Box<dyn BusLink + Send>,
        sizer: Box<dyn FrameSizer + Send + Sync>,
        seed: u64,
    ) -> Self {
        Self::with_delay(bus, sizer, RetryDelay::seeded(seed))
    }

    fn with_delay(
        bus: Box<dyn BusLink + Send>,
        sizer: Box<dyn FrameSizer + Send + Sync>,
        delay: RetryDelay,
    ) -> Self {
        Self {
            bus: Mutex::new(BusState { link: bus, delay }),
            state: Mutex::new(CommandState::Idle),
            hard_fault: OnceLock::new(),
            sizer,
        }
    }

    /// Record a permanent hardware fault detected outside this transport
    /// (typically by bus bring-up code). The first recorded fault sticks
    /// for the life of the session; later calls are ignored.
    pub fn record_hard_fault(&self, fault: FaultCode) {
        if self.hard_fault.set(fault).is_ok() {
            error!("hard fault {} recorded, transport disabled", fault);
        }
    }

    /// The recorded hard fault, if any.
    pub fn hard_fault(&self) -> Option<FaultCode> {
        self.hard_fault.get().copied()
    }

    /// Current state of the outstanding command.
    pub fn command_state(&self) -> CommandState {
        *self.lock_state()
    }

    /// Send a command frame.
    ///
    /// Opens a fresh cancellation window, then writes the frame in one bus
    /// transaction. If the chip was in power-down the write is retried once
    /// after a jittered 6–10 ms pause; any other first-attempt failure, and
    /// any second failure, is surfaced as-is. A short write maps to
    /// [`Error::RemoteIo`].
    pub fn send_frame(&self, frame: &[u8]) -> Result<()> {
        if let Some(fault) = self.hard_fault.get() {
            return Err(Error::HardFault(*fault));
        }
        if frame.is_empty() {
            return Err(Error::EmptyFrame);
        }

        // A new send always starts a fresh cancellation window.
        *self.lock_state() = CommandState::Sent;

        #[cfg(feature = "diagnostics")]
        log::trace!("tx {}", crate::utils::bytes_to_hex_spaced(frame));

        let mut bus = self.lock_bus();
        let written = match bus.link.write(frame) {
            Err(BusError::PowerDown) => {
                // Chip was asleep when addressed; give it time to wake up
                // and try once more.
                let pause = bus.delay.wake_interval();
                debug!("chip in power-down, retrying send in {:?}", pause);
                thread::sleep(pause);
                bus.link.write(frame)?
            }
            Err(e) => return Err(e.into()),
            Ok(n) => n,
        };

        if written != frame.len() {
            error!("short write: {} of {} bytes", written, frame.len());
            return Err(Error::RemoteIo);
        }
        Ok(())
    }

    /// Send the fixed ACK frame, cancelling the command currently executing
    /// in the chip.
    ///
    /// Best-effort by design: exactly six bytes must go out or the result
    /// is [`Error::RemoteIo`], and there is no power-down retry here — a
    /// caller sending an ACK is already tearing the command down.
    pub fn send_ack(&self) -> Result<()> {
        let mut bus = self.lock_bus();
        let written = bus.link.write(&ACK_FRAME)?;
        drop(bus);

        if written != ACK_FRAME.len() {
            error!("short ack write: {} of {} bytes", written, ACK_FRAME.len());
            return Err(Error::RemoteIo);
        }
        Ok(())
    }

    /// Read one response frame from the bus.
    ///
    /// The whole over-allocated receive buffer must fill in one bus
    /// transaction; anything else is [`Error::RemoteIo`]. The leading
    /// status byte must carry the ready bit, otherwise the chip is still
    /// preparing data and the result is [`Error::DeviceBusy`] — retry the
    /// read later. On success the status byte is stripped and the buffer
    /// trimmed to the length the frame sizer reports. A discarded buffer is
    /// never exposed.
    pub fn read_frame(&self) -> Result<Frame> {
        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(RX_BUF_LEN).map_err(|_| Error::Alloc)?;
        buf.resize(RX_BUF_LEN, 0);

        let n = {
            let mut bus = self.lock_bus();
            bus.link.read(&mut buf)?
        };
        if n != RX_BUF_LEN {
            error!("cannot read: {} of {} bytes", n, RX_BUF_LEN);
            return Err(Error::RemoteIo);
        }

        if buf[0] & READY_BIT == 0 {
            debug!("ready flag not set, response not available yet");
            return Err(Error::DeviceBusy);
        }

        // Drop the status byte, then trim the over-allocation padding.
        buf.drain(..1);
        let size = self.sizer.rx_frame_size(&buf);
        buf.truncate(size);
        Ok(Frame::from_bytes(buf))
    }

    /// Read one response frame and hand it to `sink` — the path an
    /// interrupt or poll loop drives.
    ///
    /// Read errors propagate to the caller ([`Error::DeviceBusy`] means
    /// poll again). A frame whose command has already been cancelled lost
    /// the race: it is dropped here rather than delivered as a stale
    /// success.
    pub fn recv_frame(&self, sink: &dyn CompletionSink) -> Result<()> {
        let frame = self.read_frame()?;

        let claimed = {
            let mut state = self.lock_state();
            match *state {
                CommandState::Sent => {
                    *state = CommandState::Completed;
                    true
                }
                _ => false,
            }
        };

        // The sink runs outside the state lock so it may immediately issue
        // the next send.
        if claimed {
            sink.on_frame(frame);
        } else {
            debug!("dropping {}-byte frame for cancelled command", frame.len());
        }
        Ok(())
    }

    /// Abort the outstanding command.
    ///
    /// Claims the command, sends a best-effort ACK to cancel it inside the
    /// chip, and reports the cancellation to `sink`. The report goes out
    /// even if the ACK write failed — the session has already moved past
    /// this command. A response frame that still arrives afterwards is
    /// discarded by [`Session::recv_frame`]. With no command outstanding
    /// (or one already completed) this is a no-op.
    pub fn abort_cmd(&self, sink: &dyn CompletionSink) {
        let claimed = {
            let mut state = self.lock_state();
            match *state {
                CommandState::Sent => {
                    *state = CommandState::Cancelling;
                    true
                }
                _ => false,
            }
        };
        if !claimed {
            debug!("abort requested with no command outstanding");
            return;
        }

        if let Err(e) = self.send_ack() {
            warn!("ack not delivered during abort: {}", e);
        }

        {
            let mut state = self.lock_state();
            // A new send may already have replaced the cancellation window.
            if *state == CommandState::Cancelling {
                *state = CommandState::Completed;
            }
        }
        sink.on_cancelled(Error::Cancelled);
    }

    fn lock_bus(&self) -> MutexGuard<'_, BusState> {
        self.bus.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_state(&self) -> MutexGuard<'_, CommandState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
