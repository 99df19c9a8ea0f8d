//! WebSocket layer: connection acceptance and the per-connection
//! producer loop.
//!
//! The endpoint at `/ws` upgrades each request to a persistent duplex
//! channel and pushes one JSON payload per tick until the peer goes
//! away or the server shuts down.

pub mod handler;
pub mod producer;
