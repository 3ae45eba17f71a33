//! Adapters - concrete implementations of ports plus the transport layer.

pub mod bot;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;
