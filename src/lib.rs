//! Connect Four - Realtime multiplayer board game server
//!
//! This crate implements a concurrent session hub that tracks many
//! simultaneous games, serializes access to each game's board, fans out
//! state changes to connected players, and drives an automated opponent
//! when no second human shows up.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
