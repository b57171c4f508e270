//! GeoCom and GSI Online protocol engine for Leica surveying instruments.
//!
//! A [`port::Guard`] owns the serial connection and enforces timeouts,
//! wake-up and retries. A [`protocol::Engine`] frames requests, runs one
//! exchange through the guard and turns the reply into a
//! [`protocol::Response`]. Per-instrument command shapes live in
//! [`commands`] as static tables.

pub mod commands;
mod error;
pub mod port;
pub mod protocol;

pub use error::{Error, Result};
