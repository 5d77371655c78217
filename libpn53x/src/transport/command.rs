// libpn53x-rs/libpn53x/src/transport/command.rs

//! Completion discipline for the single outstanding command.

use crate::Error;
use crate::protocol::Frame;

/// Lifecycle of the command currently owning the session.
///
/// Exactly one command is in flight per session. Frame delivery claims the
/// command with `Sent -> Completed`; an abort claims it with
/// `Sent -> Cancelling` (and finishes at `Completed` once the cancellation
/// has been reported). Whichever path fails to claim backs off, so the
/// sink hears about each command exactly once. All transitions happen under
/// the session's state lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    /// No command has been sent yet.
    Idle,
    /// A command frame is on the wire and its outcome is unresolved.
    Sent,
    /// An abort has claimed the command; its cancellation is being
    /// reported.
    Cancelling,
    /// The command's single outcome has been delivered.
    Completed,
}

/// Receiver for the terminal outcome of an outstanding command.
///
/// Implemented by the controller-independent layer above this crate. The
/// methods take `&self` because delivery may happen from whichever thread
/// wins the completion race; implementations synchronize internally.
pub trait CompletionSink {
    /// A response frame arrived for the outstanding command.
    fn on_frame(&self, frame: Frame);

    /// The outstanding command terminated without a response.
    fn on_cancelled(&self, reason: Error);
}
