//! Board model, argument parsing and persistence for godo.

pub mod args;
pub mod board;
pub mod config;
pub mod resolve;
pub mod storage;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
