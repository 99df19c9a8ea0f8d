//! # pulsefeed
//!
//! WebSocket push feed that streams random-number payloads to every
//! connected client, over plaintext or TLS.
//!
//! The server upgrades `GET /ws` to a WebSocket and runs one producer
//! loop per connection: every tick it samples a number, wraps it in a
//! [`domain::Payload`], and pushes it as a JSON text message. The
//! bundled client consumes the stream until interrupted, then drives a
//! cooperative close handshake with a bounded grace period.
//!
//! ## Architecture
//!
//! ```text
//! Browser / pulsefeed-client
//!     │
//!     ├── Test page + health (api/)
//!     ├── WS upgrade handler (ws/handler)
//!     │       └── producer loop per connection (ws/producer)
//!     │
//!     ├── NumberSampler (domain/)
//!     │
//!     └── Client side (client/)
//!             ├── consumer loop
//!             └── shutdown coordinator
//! ```

pub mod api;
pub mod app;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod tls;
pub mod ws;
