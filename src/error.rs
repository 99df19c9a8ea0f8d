//! Feed error types.
//!
//! [`FeedError`] covers the unrecoverable paths: configuration and
//! listener problems on the server, dial and TLS setup problems on the
//! client. Per-connection failures (a send or receive that fails once
//! the channel is up) are local to their loop and are logged where
//! they occur rather than surfaced through this type.

/// Failure taxonomy for startup and connection establishment.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Configuration is missing or cannot be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The client could not establish the WebSocket channel.
    #[error("websocket connect failed: {0}")]
    Dial(#[from] tokio_tungstenite::tungstenite::Error),

    /// TLS connector construction failed on the client.
    #[error("tls setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// Listener bind or certificate loading failed on the server.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
