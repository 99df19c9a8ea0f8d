//! Graceful-close state machine for the client side of the channel.
//!
//! Two-phase close: notify the peer, then wait a bounded grace period
//! for its acknowledgement. The bound keeps the client from hanging on
//! a peer that never answers, while a well-behaved peer gets the full
//! grace period to finish any in-flight read and close cleanly.

use std::time::Duration;

use futures_util::{Sink, SinkExt};
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

/// Close-handshake states. `Done` is terminal: the channel is
/// considered released regardless of which path reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseState {
    /// Waiting for either loop completion or an interrupt.
    Running,
    /// Close notification sent; waiting for the peer or the timeout.
    CloseSent,
    /// Handshake finished, channel released.
    Done,
}

/// Drives the `Running → CloseSent → Done` close handshake.
///
/// Generic over the outbound sink so it can be exercised against an
/// in-memory channel in tests.
#[derive(Debug)]
pub struct ShutdownCoordinator {
    state: CloseState,
    grace: Duration,
}

impl ShutdownCoordinator {
    /// Creates a coordinator in `Running` with the given grace period.
    #[must_use]
    pub const fn new(grace: Duration) -> Self {
        Self {
            state: CloseState::Running,
            grace,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CloseState {
        self.state
    }

    /// `Running → CloseSent`: sends a normal-closure close frame with
    /// an empty reason. Idempotent: once past `Running` this is a
    /// no-op and nothing is re-sent. If the send itself fails the
    /// coordinator jumps straight to `Done`.
    pub async fn begin_close<S>(&mut self, sink: &mut S) -> CloseState
    where
        S: Sink<Message> + Unpin,
        S::Error: std::fmt::Display,
    {
        if self.state != CloseState::Running {
            return self.state;
        }

        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: tokio_tungstenite::tungstenite::Utf8Bytes::from_static(""),
        };
        match sink.send(Message::Close(Some(frame))).await {
            Ok(()) => {
                tracing::debug!("close notification sent");
                self.state = CloseState::CloseSent;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to send close notification");
                self.state = CloseState::Done;
            }
        }
        self.state
    }

    /// `CloseSent → Done`: resolves when the consumer signals
    /// completion (the peer acknowledged by closing its side) or when
    /// the grace period elapses, whichever comes first.
    pub async fn await_peer(&mut self, done: &mut watch::Receiver<bool>) -> CloseState {
        if self.state == CloseState::CloseSent {
            match tokio::time::timeout(self.grace, done.wait_for(|done| *done)).await {
                Ok(_) => tracing::debug!("peer acknowledged close"),
                Err(_) => tracing::debug!("close grace period elapsed"),
            }
        }
        self.state = CloseState::Done;
        self.state
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// In-memory sink that records every sent message, optionally
    /// failing each send.
    #[derive(Debug, Default)]
    struct RecordingSink {
        sent: Vec<Message>,
        fail: bool,
    }

    impl Sink<Message> for RecordingSink {
        type Error = std::io::Error;

        fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(self: Pin<&mut Self>, item: Message) -> Result<(), Self::Error> {
            let sink = self.get_mut();
            if sink.fail {
                return Err(std::io::Error::other("sink closed"));
            }
            sink.sent.push(item);
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn begin_close_sends_exactly_one_frame() {
        let mut sink = RecordingSink::default();
        let mut coordinator = ShutdownCoordinator::new(Duration::from_secs(1));

        assert_eq!(
            coordinator.begin_close(&mut sink).await,
            CloseState::CloseSent
        );
        // Second trigger must be a no-op.
        assert_eq!(
            coordinator.begin_close(&mut sink).await,
            CloseState::CloseSent
        );

        assert_eq!(sink.sent.len(), 1);
        assert!(matches!(sink.sent.first(), Some(Message::Close(Some(_)))));
    }

    #[tokio::test]
    async fn close_frame_is_normal_closure_with_empty_reason() {
        let mut sink = RecordingSink::default();
        let mut coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
        coordinator.begin_close(&mut sink).await;

        let Some(Message::Close(Some(frame))) = sink.sent.first() else {
            panic!("expected a close frame");
        };
        assert_eq!(frame.code, CloseCode::Normal);
        assert!(frame.reason.is_empty());
    }

    #[tokio::test]
    async fn failed_send_goes_straight_to_done() {
        let mut sink = RecordingSink {
            sent: Vec::new(),
            fail: true,
        };
        let mut coordinator = ShutdownCoordinator::new(Duration::from_secs(1));

        assert_eq!(coordinator.begin_close(&mut sink).await, CloseState::Done);
        assert!(sink.sent.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_peer_never_acknowledges() {
        let mut sink = RecordingSink::default();
        let mut coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
        coordinator.begin_close(&mut sink).await;

        let (_done_tx, mut done_rx) = watch::channel(false);
        let started = tokio::time::Instant::now();
        assert_eq!(coordinator.await_peer(&mut done_rx).await, CloseState::Done);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn completion_signal_short_circuits_the_wait() {
        let mut sink = RecordingSink::default();
        let mut coordinator = ShutdownCoordinator::new(Duration::from_secs(60));
        coordinator.begin_close(&mut sink).await;

        let (done_tx, mut done_rx) = watch::channel(false);
        let _ = done_tx.send(true);
        assert_eq!(coordinator.await_peer(&mut done_rx).await, CloseState::Done);
    }
}
